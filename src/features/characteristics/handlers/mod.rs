pub mod characteristic_handler;
pub mod option_handler;
