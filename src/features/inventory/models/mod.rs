mod item;

pub use item::{ItemRow, ItemStatus};
