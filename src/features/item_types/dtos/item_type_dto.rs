use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request DTO for creating or updating an item type
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveItemTypeDto {
    #[validate(length(min = 1, max = 255, message = "Name is required."))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Query params for listing item types
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListItemTypesQuery {
    /// If set, only return item types with this active flag
    pub active: Option<bool>,
}

/// Response DTO for an item type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemTypeResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Number of inventory items referencing this type
    pub items_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let dto = SaveItemTypeDto {
            name: String::new(),
            description: None,
            is_active: true,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn is_active_defaults_to_true() {
        let dto: SaveItemTypeDto = serde_json::from_str(r#"{"name": "Laptop"}"#).unwrap();
        assert!(dto.is_active);
    }
}
