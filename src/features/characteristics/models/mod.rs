mod characteristic;
mod characteristic_option;

pub use characteristic::{Characteristic, CharacteristicKind};
pub use characteristic_option::CharacteristicOption;
