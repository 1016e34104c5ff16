use trivia_core::model::{Category, CategoryId, NewCategory};

use super::SqliteRepository;
use super::mapping::{category_id_from_i64, category_id_to_i64, db_err, map_category_row};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn insert_new_category(&self, category: &NewCategory) -> Result<CategoryId, StorageError> {
        let res = sqlx::query("INSERT INTO categories (type) VALUES (?1)")
            .bind(category.label())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        category_id_from_i64(res.last_insert_rowid())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        // Ids past i64::MAX can never have been assigned.
        let Ok(raw) = category_id_to_i64(id) else {
            return Ok(None);
        };
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?1")
            .bind(raw)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_category_row).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in rows {
            categories.push(map_category_row(&row)?);
        }
        Ok(categories)
    }
}
