pub mod cehennemi_services;
pub mod edge_services;
pub mod extractor_services;
pub mod fetch_services;
pub mod solver_services;

pub use cehennemi_services::DynCehennemiService;
pub use extractor_services::DynEmbedExtractor;
pub use fetch_services::DynFetchService;
pub use solver_services::DynChallengeSolver;
