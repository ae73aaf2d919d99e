pub mod audit;
pub mod constants;
pub mod localization;
pub mod types;
pub mod validation;
