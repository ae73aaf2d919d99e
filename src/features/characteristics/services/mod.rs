mod characteristic_service;
mod option_service;

pub use characteristic_service::CharacteristicService;
pub use option_service::OptionService;
