use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::locations::dtos::LocationResponseDto;

#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items_count: i64,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            description: l.description,
            is_active: l.is_active,
            items_count: l.items_count,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
