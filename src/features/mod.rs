pub mod assignments;
pub mod categories;
pub mod characteristics;
pub mod filters;
pub mod products;
