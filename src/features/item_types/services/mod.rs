mod item_type_service;

pub use item_type_service::ItemTypeService;
