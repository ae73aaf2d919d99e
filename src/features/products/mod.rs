//! Product surface.
//!
//! Products live in exactly one category and carry a semi-structured spec
//! document (characteristic key to value). Writes validate the document
//! against the category's link set and report findings without rejecting
//! the write; stale keys from deleted characteristics are tolerated.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
