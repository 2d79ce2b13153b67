use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request DTO for creating or updating a location
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveLocationDto {
    #[validate(length(min = 1, max = 255, message = "Name is required."))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Query params for listing locations
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListLocationsQuery {
    /// If set, only return locations with this active flag
    pub active: Option<bool>,
}

/// Response DTO for a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Number of inventory items stored at this location
    pub items_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_longer_than_255_fails_validation() {
        let dto = SaveLocationDto {
            name: "x".repeat(256),
            description: None,
            is_active: true,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
