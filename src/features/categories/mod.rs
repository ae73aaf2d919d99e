//! Hierarchical catalog categories.
//!
//! Categories form a self-referential tree consumed by the attribute
//! engine: characteristic links and filter definitions hang off individual
//! categories, and propagation copies link sets between them. Reparenting
//! is cycle-checked; deletion cascades to links and filters but is rejected
//! while products still reference the category.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
