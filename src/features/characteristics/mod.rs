//! Global characteristic dictionary.
//!
//! Characteristics are typed attribute definitions (e.g. "CPU", "print
//! speed") that categories link against. The machine `key` is the stable
//! identifier referenced by product spec documents; select/multiselect
//! characteristics own an ordered option set whose `value` is the canonical
//! form stored in specs.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{CharacteristicService, OptionService};
