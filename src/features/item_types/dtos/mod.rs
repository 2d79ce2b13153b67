mod item_type_dto;

pub use item_type_dto::*;
