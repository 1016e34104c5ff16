use std::sync::Arc;

use storage::repository::Storage;

use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz_service::QuizService;

/// Assembles the services exposed over the API from one storage backend.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionService>,
    categories: Arc<CategoryService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the page
    /// size is zero.
    pub async fn new_sqlite(db_url: &str, page_size: usize) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, page_size)
    }

    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::InvalidPageSize` for a zero page size.
    pub fn from_storage(storage: &Storage, page_size: usize) -> Result<Self, AppServicesError> {
        if page_size == 0 {
            return Err(AppServicesError::InvalidPageSize);
        }
        Ok(Self {
            questions: Arc::new(QuestionService::new(
                Arc::clone(&storage.questions),
                Arc::clone(&storage.categories),
                page_size,
            )),
            categories: Arc::new(CategoryService::new(Arc::clone(&storage.categories))),
            quiz: Arc::new(QuizService::new(
                Arc::clone(&storage.questions),
                Arc::clone(&storage.categories),
            )),
        })
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_rejected() {
        let result = AppServices::from_storage(&Storage::in_memory(), 0);
        assert!(matches!(result, Err(AppServicesError::InvalidPageSize)));
    }

    #[test]
    fn services_share_one_backend() {
        let services = AppServices::from_storage(&Storage::in_memory(), 10).unwrap();
        assert_eq!(services.questions().page_size(), 10);
    }
}
