pub mod filter_dto;

pub use filter_dto::{CreateFilterDto, FilterListQuery, FilterResponseDto, UpdateFilterDto};
