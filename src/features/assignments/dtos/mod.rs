pub mod assignment_dto;

pub use assignment_dto::{
    AssignCharacteristicDto, CopyLinksDto, CopyResultDto, LinkResponseDto,
    LinkedCharacteristicDto, LinkedOptionDto, UpdateLinkDto,
};
