use sqlx::PgPool;
use tracing::instrument;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::SaveLocationDto;
use crate::features::locations::models::Location;
use crate::shared::types::PaginationQuery;

const SELECT_LOCATION: &str = r#"
    SELECT l.id, l.name, l.description, l.is_active, l.created_at, l.updated_at,
           (SELECT COUNT(*) FROM inventory_items i WHERE i.location_id = l.id) AS items_count
    FROM locations l
"#;

/// Service for location catalog management
#[derive(Clone)]
pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List locations ordered by name, optionally filtered by active flag.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        active: Option<bool>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Location>, i64)> {
        let sql = format!(
            "{SELECT_LOCATION} WHERE ($1::boolean IS NULL OR l.is_active = $1) \
             ORDER BY l.name ASC LIMIT $2 OFFSET $3"
        );
        let locations = sqlx::query_as::<_, Location>(&sql)
            .bind(active)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM locations l WHERE ($1::boolean IS NULL OR l.is_active = $1)",
        )
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok((locations, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Location> {
        let sql = format!("{SELECT_LOCATION} WHERE l.id = $1");
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {id} not found")))
    }

    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: &SaveLocationDto) -> Result<Location> {
        self.ensure_name_available(&dto.name, None).await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO locations (name, description, is_active) VALUES ($1, $2, $3) RETURNING id",
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
    pub async fn update(&self, id: i64, dto: &SaveLocationDto) -> Result<Location> {
        self.ensure_name_available(&dto.name, Some(id)).await?;

        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE locations SET name = $1, description = $2, is_active = $3, updated_at = now() \
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
                "Location with id {id} not found"
            ))),
        }
    }

    /// Delete a location. Refused while inventory items still reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items WHERE location_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if dependents > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete: {dependents} items reference this location"
            )));
        }

        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM locations WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Location with id {id} not found"
            ))),
        }
    }

    async fn ensure_name_available(&self, name: &str, exclude_id: Option<i64>) -> Result<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM locations WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        if taken {
            return Err(AppError::validation(
                "name",
                "A location with this name already exists.",
            ));
        }
        Ok(())
    }
}

/// Map unique violations raced past the pre-check to field-level errors.
fn translate_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.constraint() == Some("locations_name_key") {
            return AppError::validation("name", "A location with this name already exists.");
        }
    }
    err.into()
}
