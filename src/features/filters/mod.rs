//! Storefront filter definitions.
//!
//! A filter is either derived from a linked characteristic or defined
//! standalone ("custom"). Display positions are a per-subcategory
//! monotonic counter assigned at creation; disabling a filter hides it
//! from the storefront without deleting the row.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FilterService;
