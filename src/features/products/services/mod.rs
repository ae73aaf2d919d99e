mod product_service;
pub mod spec_validator;

pub use product_service::ProductService;
pub use spec_validator::{SpecReport, SpecRule};
