mod item_type_handler;

pub use item_type_handler::*;
