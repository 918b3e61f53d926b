use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trivia_core::AppError;
use trivia_models::{Category, CategoryId};

use super::model::{CategoryMap, to_category_map};

#[derive(Clone, Debug)]
pub struct CategoryService {
    db: PgPool,
}

impl CategoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All categories ordered by id. A failed read is reported as not found:
    /// the listing endpoints have nothing to show.
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
                .fetch_all(&self.db)
                .await
                .map_err(|e| {
                    error!(error = %e, "Database error listing categories");
                    AppError::not_found(e)
                })?;

        debug!(count = %categories.len(), "Fetched categories");

        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn category_map(&self) -> Result<CategoryMap, AppError> {
        Ok(to_category_map(self.list_categories().await?))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn get_category_by_id(&self, id: CategoryId) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, category.id = %id, "Database error fetching category");
                AppError::database(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category {} not found", id)))
    }
}
