use std::sync::Arc;

use storage::repository::CategoryRepository;
use tracing::info;
use trivia_core::model::{Category, CategoryId, NewCategory};

use crate::error::CategoryServiceError;

/// Orchestrates category listing and creation.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// All categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.categories.list_categories().await?)
    }

    /// Fetch a category by ID.
    ///
    /// Returns `Ok(None)` when the category does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryServiceError> {
        Ok(self.categories.get_category(id).await?)
    }

    /// Create a new category with the given label.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Category` for a blank label.
    /// Returns `CategoryServiceError::Storage` if persistence fails.
    pub async fn create_category(&self, label: String) -> Result<CategoryId, CategoryServiceError> {
        let category = NewCategory::new(label)?;
        let id = self.categories.insert_new_category(&category).await?;
        info!(category_id = %id, label = category.label(), "category created");
        Ok(id)
    }
}
