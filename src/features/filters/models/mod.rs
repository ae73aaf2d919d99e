mod filter;

pub use filter::{CategoryFilter, FilterKind, FilterSource, FilterWithCharacteristicRow};
