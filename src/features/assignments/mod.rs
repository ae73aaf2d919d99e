//! Category-characteristic links and propagation.
//!
//! A link scopes a dictionary characteristic to one category with per-link
//! configuration (required flag, key-spec visibility, display order).
//! Assignment is an idempotent upsert, unassignment treats absence as
//! success, and propagation copies a category's whole link set onto another
//! category in one transaction without overwriting existing target links.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AssignmentService;
