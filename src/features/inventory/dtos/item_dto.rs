use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::inventory::models::{ItemRow, ItemStatus};

/// Search and filter parameters for inventory listings and exports.
///
/// Serializes back out unchanged so clients can reconstruct the query string
/// of the page they are looking at.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ItemFilter {
    /// Substring match over item name, barcode, serial number, type name and
    /// location name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Item type id
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<i64>,

    /// Location id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

/// Request DTO for creating or updating an inventory item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveItemDto {
    #[validate(length(min = 1, max = 255, message = "Item name is required."))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Barcode is required."))]
    pub barcode: String,

    #[validate(length(min = 1, max = 255, message = "Serial number is required."))]
    pub serial_number: String,

    pub item_type_id: i64,

    pub location_id: i64,

    pub description: Option<String>,

    /// Free-form string key/value attributes
    pub custom_fields: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub status: ItemStatus,

    pub purchase_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_purchase_price"))]
    pub purchase_price: Option<Decimal>,
}

const MAX_PURCHASE_PRICE: Decimal = Decimal::from_parts(99999999, 0, 0, false, 2);

fn price_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("purchase_price");
    err.message = Some(message.into());
    err
}

fn validate_purchase_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(price_error("Purchase price may not be negative."));
    }
    if *price > MAX_PURCHASE_PRICE {
        return Err(price_error("Purchase price may not exceed 999999.99."));
    }
    if price.normalize().scale() > 2 {
        return Err(price_error(
            "Purchase price may not have more than 2 decimal places.",
        ));
    }
    Ok(())
}

/// Response DTO for a single inventory item, with joined display names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: i64,
    pub name: String,
    pub barcode: String,
    pub serial_number: String,
    pub item_type_id: i64,
    pub item_type_name: String,
    pub location_id: i64,
    pub location_name: String,
    pub description: Option<String>,
    pub custom_fields: Option<BTreeMap<String, String>>,
    pub status: ItemStatus,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub created_by: i64,
    pub created_by_name: String,
    pub updated_by: Option<i64>,
    pub updated_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemRow> for ItemResponseDto {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            barcode: row.barcode,
            serial_number: row.serial_number,
            item_type_id: row.item_type_id,
            item_type_name: row.item_type_name,
            location_id: row.location_id,
            location_name: row.location_name,
            description: row.description,
            custom_fields: row.custom_fields.map(|f| f.0),
            status: row.status,
            purchase_date: row.purchase_date,
            purchase_price: row.purchase_price,
            created_by: row.created_by,
            created_by_name: row.created_by_name,
            updated_by: row.updated_by,
            updated_by_name: row.updated_by_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One page of inventory items plus the filter that produced it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemPageDto {
    pub items: Vec<ItemResponseDto>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub last_page: i64,
    /// The applied filter, echoed back for query-string reconstruction
    pub filters: ItemFilter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn valid_dto() -> SaveItemDto {
        SaveItemDto {
            name: "ThinkPad X1".to_string(),
            barcode: "INV-0001".to_string(),
            serial_number: "SN-1234".to_string(),
            item_type_id: 1,
            location_id: 1,
            description: None,
            custom_fields: None,
            status: ItemStatus::Active,
            purchase_date: None,
            purchase_price: None,
        }
    }

    #[test]
    fn missing_barcode_fails_validation() {
        let dto = SaveItemDto {
            barcode: String::new(),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("barcode"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let dto = SaveItemDto {
            purchase_price: Some(Decimal::new(-100, 2)),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("purchase_price"));
    }

    #[test]
    fn price_above_bound_is_rejected() {
        let dto = SaveItemDto {
            purchase_price: Some(Decimal::new(100_000_000, 2)),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn price_with_three_decimal_places_is_rejected() {
        let dto = SaveItemDto {
            purchase_price: Some(Decimal::new(19_999, 3)),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn boundary_price_with_trailing_zeros_passes() {
        let dto = SaveItemDto {
            purchase_price: Some(Decimal::new(999_999_990, 3)),
            ..valid_dto()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn filter_round_trips_through_query_string_names() {
        let filter = ItemFilter {
            search: Some("laptop".to_string()),
            item_type: Some(2),
            location: None,
            status: Some(ItemStatus::Retired),
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["status"], "retired");
        assert!(json.get("location").is_none());

        let back: ItemFilter = serde_json::from_value(json).unwrap();
        assert_eq!(back.item_type, Some(2));
        assert_eq!(back.status, Some(ItemStatus::Retired));
    }

    #[test]
    fn unknown_status_string_is_rejected_on_deserialize() {
        let result: Result<ItemFilter, _> = serde_json::from_str(r#"{"status": "broken"}"#);
        assert!(result.is_err());
    }
}
