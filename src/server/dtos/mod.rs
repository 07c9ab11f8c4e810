pub mod catalog_dto;
pub mod health_dto;
pub mod links_dto;
