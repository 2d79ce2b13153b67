use sqlx::PgPool;
use tracing::instrument;

use crate::core::error::{AppError, Result};
use crate::features::item_types::dtos::SaveItemTypeDto;
use crate::features::item_types::models::ItemType;
use crate::shared::types::PaginationQuery;

const SELECT_ITEM_TYPE: &str = r#"
    SELECT t.id, t.name, t.description, t.is_active, t.created_at, t.updated_at,
           (SELECT COUNT(*) FROM inventory_items i WHERE i.item_type_id = t.id) AS items_count
    FROM item_types t
"#;

/// Service for item type catalog management
#[derive(Clone)]
pub struct ItemTypeService {
    pool: PgPool,
}

impl ItemTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List item types ordered by name, optionally filtered by active flag.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        active: Option<bool>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ItemType>, i64)> {
        let sql = format!(
            "{SELECT_ITEM_TYPE} WHERE ($1::boolean IS NULL OR t.is_active = $1) \
             ORDER BY t.name ASC LIMIT $2 OFFSET $3"
        );
        let types = sqlx::query_as::<_, ItemType>(&sql)
            .bind(active)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM item_types t WHERE ($1::boolean IS NULL OR t.is_active = $1)",
        )
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok((types, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ItemType> {
        let sql = format!("{SELECT_ITEM_TYPE} WHERE t.id = $1");
        sqlx::query_as::<_, ItemType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item type with id {id} not found")))
    }

    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: &SaveItemTypeDto) -> Result<ItemType> {
        self.ensure_name_available(&dto.name, None).await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO item_types (name, description, is_active) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_db_error)?;

        self.get(id).await
    }

    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: &SaveItemTypeDto) -> Result<ItemType> {
        self.ensure_name_available(&dto.name, Some(id)).await?;

        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE item_types SET name = $1, description = $2, is_active = $3, updated_at = now() \
             WHERE id = $4 RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate_db_error)?;

        match updated {
            Some(id) => self.get(id).await,
            None => Err(AppError::NotFound(format!(
                "Item type with id {id} not found"
            ))),
        }
    }

    /// Delete an item type. Refused while inventory items still reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items WHERE item_type_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if dependents > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete: {dependents} items reference this type"
            )));
        }

        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM item_types WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Item type with id {id} not found"
            ))),
        }
    }

    async fn ensure_name_available(&self, name: &str, exclude_id: Option<i64>) -> Result<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM item_types WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        if taken {
            return Err(AppError::validation(
                "name",
                "An item type with this name already exists.",
            ));
        }
        Ok(())
    }
}

/// Map unique violations raced past the pre-check to field-level errors.
fn translate_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.constraint() == Some("item_types_name_key") {
            return AppError::validation("name", "An item type with this name already exists.");
        }
    }
    err.into()
}
