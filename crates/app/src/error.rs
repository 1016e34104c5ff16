use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use services::{CategoryServiceError, ErrorKind, QuestionServiceError, QuizError};
use thiserror::Error;
use tracing::{error, warn};
use trivia_core::PageError;

use crate::dto::ErrorBody;

/// Errors returned by HTTP handlers, one variant per response status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable: {0}")]
    Unprocessable(String),
}

impl ApiError {
    fn from_kind(kind: ErrorKind, detail: String) -> Self {
        match kind {
            ErrorKind::NotFound => Self::NotFound(detail),
            ErrorKind::InvalidRequest => Self::BadRequest(detail),
            ErrorKind::Unprocessable => Self::Unprocessable(detail),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad request",
            Self::NotFound(_) => "page not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable(_) => "unprocessable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if matches!(self, Self::Unprocessable(_)) {
            error!(status = status.as_u16(), "{self}");
        } else {
            warn!(status = status.as_u16(), "{self}");
        }
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QuestionServiceError> for ApiError {
    fn from(err: QuestionServiceError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(err: CategoryServiceError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

// Path segments are typed (`/questions/{id}` only matches integer ids), so a
// segment that fails to parse is an unknown route.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::QuestionId;

    #[test]
    fn service_kinds_map_to_statuses() {
        let err: ApiError = QuestionServiceError::QuestionNotFound(QuestionId::new(9)).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message(), "unprocessable");

        let err: ApiError = QuizError::NoQuestions.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "page not found");
    }

    #[test]
    fn invalid_page_is_bad_request() {
        let err: ApiError = "0".parse::<trivia_core::PageNumber>().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
