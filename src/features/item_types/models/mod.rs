mod item_type;

pub use item_type::ItemType;
