mod component_dto;

pub use component_dto::{
    AddComponentTagDto, ComponentResponseDto, CreateComponentDto, ListComponentsQuery,
    UpdateComponentApprovalDto, UpdateComponentDto, UpdateComponentStatusDto,
};
