use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lifecycle status of an inventory item.
///
/// Stored as the Postgres enum `item_status`, serialized lowercase on the
/// wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Maintenance => "maintenance",
            ItemStatus::Retired => "retired",
        }
    }

    /// Display form used in exports ("Active", "Maintenance", "Retired")
    pub fn capitalized(&self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Maintenance => "Maintenance",
            ItemStatus::Retired => "Retired",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory item row with its joined display names.
///
/// Every read path (list, detail, export) selects this shape in a single
/// query, so type, location and user names never require a second round
/// trip.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub barcode: String,
    pub serial_number: String,
    pub item_type_id: i64,
    pub location_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub custom_fields: Option<Json<BTreeMap<String, String>>>,
    pub status: ItemStatus,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_type_name: String,
    pub location_name: String,
    pub created_by_name: String,
    pub updated_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::Maintenance).unwrap(),
            r#""maintenance""#
        );
        let parsed: ItemStatus = serde_json::from_str(r#""retired""#).unwrap();
        assert_eq!(parsed, ItemStatus::Retired);
    }

    #[test]
    fn status_defaults_to_active() {
        assert_eq!(ItemStatus::default(), ItemStatus::Active);
    }

    #[test]
    fn capitalized_forms_match_display_conventions() {
        assert_eq!(ItemStatus::Active.capitalized(), "Active");
        assert_eq!(ItemStatus::Maintenance.capitalized(), "Maintenance");
        assert_eq!(ItemStatus::Retired.capitalized(), "Retired");
    }
}
