use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use crate::core::error::{AppError, FieldErrors, Result};
use crate::features::inventory::dtos::{ItemFilter, SaveItemDto};
use crate::features::inventory::models::ItemRow;
use crate::features::inventory::query;
use crate::shared::types::PaginationQuery;

/// Service for inventory item reads and mutations
#[derive(Clone)]
pub struct InventoryService {
    pool: PgPool,
}

impl InventoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of items matching `filter`, most recent first, with the
    /// total count for the same filter.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &ItemFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ItemRow>, i64)> {
        let mut list_qb = query::build_list_query(filter, pagination.limit(), pagination.offset());
        let items = list_qb
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_qb = query::build_count_query(filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ItemRow> {
        let mut qb = query::build_get_query(id);
        qb.build_query_as::<ItemRow>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory item with id {id} not found")))
    }

    /// Create an item. `user_id` becomes `created_by` and never changes
    /// afterwards.
    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: &SaveItemDto, user_id: i64) -> Result<ItemRow> {
        self.check_references_and_uniqueness(dto, None).await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO inventory_items \
             (barcode, serial_number, item_type_id, location_id, name, description, \
              custom_fields, status, purchase_date, purchase_price, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id",
        )
        .bind(&dto.barcode)
        .bind(&dto.serial_number)
        .bind(dto.item_type_id)
        .bind(dto.location_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.custom_fields.clone().map(Json))
        .bind(dto.status)
        .bind(dto.purchase_date)
        .bind(dto.purchase_price)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_db_error)?;

        self.get(id).await
    }

    /// Update an item. `user_id` becomes `updated_by`; uniqueness checks
    /// exclude the row being updated so an unchanged barcode never collides
    /// with itself.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: &SaveItemDto, user_id: i64) -> Result<ItemRow> {
        self.check_references_and_uniqueness(dto, Some(id)).await?;

        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE inventory_items SET \
             barcode = $1, serial_number = $2, item_type_id = $3, location_id = $4, \
             name = $5, description = $6, custom_fields = $7, status = $8, \
             purchase_date = $9, purchase_price = $10, updated_by = $11, updated_at = now() \
             WHERE id = $12 RETURNING id",
        )
        .bind(&dto.barcode)
        .bind(&dto.serial_number)
        .bind(dto.item_type_id)
        .bind(dto.location_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.custom_fields.clone().map(Json))
        .bind(dto.status)
        .bind(dto.purchase_date)
        .bind(dto.purchase_price)
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate_db_error)?;

        match updated {
            Some(id) => self.get(id).await,
            None => Err(AppError::NotFound(format!(
                "Inventory item with id {id} not found"
            ))),
        }
    }

    /// Delete an item. Unconditional; only fails when the item is missing.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM inventory_items WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Inventory item with id {id} not found"
            ))),
        }
    }

    /// Referential and uniqueness pre-checks, accumulated into one
    /// field-error map so the client sees every problem at once. The
    /// database constraints remain authoritative; races past these checks
    /// are caught by [`translate_db_error`].
    async fn check_references_and_uniqueness(
        &self,
        dto: &SaveItemDto,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        let mut errors = FieldErrors::new();

        let type_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM item_types WHERE id = $1)")
                .bind(dto.item_type_id)
                .fetch_one(&self.pool)
                .await?;
        if !type_exists {
            errors
                .entry("item_type_id".to_string())
                .or_default()
                .push("Selected item type is invalid.".to_string());
        }

        let location_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
                .bind(dto.location_id)
                .fetch_one(&self.pool)
                .await?;
        if !location_exists {
            errors
                .entry("location_id".to_string())
                .or_default()
                .push("Selected location is invalid.".to_string());
        }

        let barcode_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM inventory_items \
             WHERE barcode = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(&dto.barcode)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        if barcode_taken {
            errors
                .entry("barcode".to_string())
                .or_default()
                .push("This barcode already exists in the inventory.".to_string());
        }

        let serial_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM inventory_items \
             WHERE serial_number = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(&dto.serial_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        if serial_taken {
            errors
                .entry("serial_number".to_string())
                .or_default()
                .push("This serial number already exists in the inventory.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Map constraint violations raced past the pre-checks to the same
/// field-level errors the pre-checks produce.
fn translate_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("inventory_items_barcode_key") => {
                    return AppError::validation(
                        "barcode",
                        "This barcode already exists in the inventory.",
                    );
                }
                Some("inventory_items_serial_number_key") => {
                    return AppError::validation(
                        "serial_number",
                        "This serial number already exists in the inventory.",
                    );
                }
                _ => {}
            }
        }
        if db_err.is_foreign_key_violation() {
            match db_err.constraint() {
                Some("inventory_items_item_type_id_fkey") => {
                    return AppError::validation("item_type_id", "Selected item type is invalid.");
                }
                Some("inventory_items_location_id_fkey") => {
                    return AppError::validation("location_id", "Selected location is invalid.");
                }
                _ => {}
            }
        }
    }
    err.into()
}
