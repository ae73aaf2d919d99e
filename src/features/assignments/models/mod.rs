mod category_characteristic;

pub use category_characteristic::{CategoryCharacteristic, LinkedCharacteristicRow};
