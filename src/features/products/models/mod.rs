mod product;

pub use product::{Product, SpecDocument, SpecValue};
