use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::item_types::dtos::ItemTypeResponseDto;

/// Database model for an item type, with the number of inventory items
/// referencing it.
#[derive(Debug, Clone, FromRow)]
pub struct ItemType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items_count: i64,
}

impl From<ItemType> for ItemTypeResponseDto {
    fn from(t: ItemType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            is_active: t.is_active,
            items_count: t.items_count,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
