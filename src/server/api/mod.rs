pub mod catalog_controller;
pub mod health_controller;
pub mod links_controller;

pub use catalog_controller::CatalogController;
pub use links_controller::LinksController;
