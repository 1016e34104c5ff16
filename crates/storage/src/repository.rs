use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use trivia_core::model::{
    Category, CategoryId, NewCategory, Question, QuestionId, ValidatedQuestion,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn insert_new_category(&self, category: &NewCategory) -> Result<CategoryId, StorageError>;

    /// Fetch a category by ID.
    ///
    /// Returns `Ok(None)` when the category does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// All categories ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}

/// Repository contract for questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a question and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the referenced category is missing,
    /// or other storage errors.
    async fn insert_new_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, StorageError>;

    /// Fetch a question by ID.
    ///
    /// Returns `Ok(None)` when the question does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// All questions ordered by ascending id, read as one snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question has this id.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

#[derive(Default)]
struct MemoryState {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    next_category_id: u64,
    next_question_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Reads share the lock; inserts and deletes take it exclusively, so a
/// listing never observes a half-applied write.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn insert_new_category(&self, category: &NewCategory) -> Result<CategoryId, StorageError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        guard.next_category_id += 1;
        let id = CategoryId::new(guard.next_category_id);
        guard.categories.insert(id, category.clone().assign_id(id));
        Ok(id)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.categories.values().cloned().collect())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_new_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        if !guard.categories.contains_key(&question.category_id) {
            return Err(StorageError::Conflict(format!(
                "category {} does not exist",
                question.category_id
            )));
        }
        guard.next_question_id += 1;
        let id = QuestionId::new(guard.next_question_id);
        guard.questions.insert(id, question.clone().assign_id(id));
        Ok(id)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.questions.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.questions.values().cloned().collect())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self.state.write().map_err(poisoned)?;
        guard
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

/// Aggregates question and category repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo);
        Self {
            questions,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::QuestionDraft;

    fn draft(category: CategoryId, text: &str) -> ValidatedQuestion {
        QuestionDraft {
            text: text.to_owned(),
            answer: "A".to_owned(),
            category_id: category,
            difficulty: 1,
            rating: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_order() {
        let repo = InMemoryRepository::new();
        let science = repo
            .insert_new_category(&NewCategory::new("Science").unwrap())
            .await
            .unwrap();
        let first = repo.insert_new_question(&draft(science, "Q1")).await.unwrap();
        let second = repo.insert_new_question(&draft(science, "Q2")).await.unwrap();
        assert!(first < second);

        let listed = repo.list_questions().await.unwrap();
        let ids: Vec<_> = listed.iter().map(Question::id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn rejects_question_for_missing_category() {
        let repo = InMemoryRepository::new();
        let err = repo
            .insert_new_question(&draft(CategoryId::new(5), "Q"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_reports_missing_ids() {
        let repo = InMemoryRepository::new();
        let cat = repo
            .insert_new_category(&NewCategory::new("Art").unwrap())
            .await
            .unwrap();
        let id = repo.insert_new_question(&draft(cat, "Q")).await.unwrap();

        repo.delete_question(id).await.unwrap();
        assert!(repo.get_question(id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_question(id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryRepository::new();
        let cat = repo
            .insert_new_category(&NewCategory::new("Art").unwrap())
            .await
            .unwrap();
        let id = repo.insert_new_question(&draft(cat, "Q")).await.unwrap();
        repo.delete_question(id).await.unwrap();
        let next = repo.insert_new_question(&draft(cat, "Q again")).await.unwrap();
        assert_ne!(id, next);
    }
}
