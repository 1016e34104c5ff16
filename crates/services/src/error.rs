//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::{CategoryError, CategoryId, QuestionError, QuestionId};
use trivia_core::PageNumber;

/// How a failure should be reported to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested page, category, or question does not exist.
    NotFound,
    /// The request itself is malformed or fails validation.
    InvalidRequest,
    /// A well-formed request that cannot be completed against current state.
    Unprocessable,
}

fn storage_kind(err: &StorageError) -> ErrorKind {
    match err {
        StorageError::NotFound => ErrorKind::NotFound,
        _ => ErrorKind::Unprocessable,
    }
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("page {0} is out of range")]
    PageOutOfRange(PageNumber),
    #[error("category {0} does not exist")]
    CategoryNotFound(CategoryId),
    #[error("question references unknown category {0}")]
    UnknownCategory(CategoryId),
    #[error("question {0} does not exist")]
    QuestionNotFound(QuestionId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuestionServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Question(_) => ErrorKind::InvalidRequest,
            Self::PageOutOfRange(_) | Self::CategoryNotFound(_) => ErrorKind::NotFound,
            // Deleting an absent id is a failed operation, not a lookup miss.
            Self::UnknownCategory(_) | Self::QuestionNotFound(_) => ErrorKind::Unprocessable,
            Self::Storage(e) => storage_kind(e),
        }
    }
}

/// Errors emitted by `CategoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CategoryServiceError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CategoryServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Category(_) => ErrorKind::InvalidRequest,
            Self::Storage(e) => storage_kind(e),
        }
    }
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz category {0} does not exist")]
    CategoryNotFound(CategoryId),
    #[error("no questions available for this quiz")]
    NoQuestions,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CategoryNotFound(_) | Self::NoQuestions => ErrorKind::NotFound,
            Self::Storage(e) => storage_kind(e),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_delete_target_is_unprocessable() {
        let err = QuestionServiceError::QuestionNotFound(QuestionId::new(1000));
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
    }

    #[test]
    fn validation_failures_are_invalid_requests() {
        let err = QuestionServiceError::from(QuestionError::EmptyText);
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        let err = CategoryServiceError::from(CategoryError::EmptyLabel);
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn store_failures_are_not_collapsed_into_not_found() {
        let err = QuestionServiceError::from(StorageError::Connection("gone".into()));
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
        let err = QuizError::from(StorageError::Conflict("fk".into()));
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
    }

    #[test]
    fn empty_quiz_pool_is_not_found() {
        assert_eq!(QuizError::NoQuestions.kind(), ErrorKind::NotFound);
    }
}
