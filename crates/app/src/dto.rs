//! Wire types for the JSON API.
//!
//! Request bodies are parsed into these explicit schemas and converted into
//! core types before they reach a service. Ids and small integers arrive as
//! either JSON numbers or numeric strings; both are normalized here.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use trivia_core::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::{CategorySelector, PageError, PageNumber, QuizSelectionRequest};

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Integer accepted as `3` or `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireInt(pub i64);

impl<'de> Deserialize<'de> for WireInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(Self(n)),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("expected an integer, got {s:?}"))),
        }
    }
}

/// Non-negative id accepted as `3` or `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireId(pub u64);

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let WireInt(n) = WireInt::deserialize(deserializer)?;
        u64::try_from(n)
            .map(Self)
            .map_err(|_| de::Error::custom(format!("id must not be negative, got {n}")))
    }
}

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// # Errors
    ///
    /// Returns `PageError` for a non-numeric or non-positive page.
    pub fn page(&self) -> Result<PageNumber, PageError> {
        PageNumber::parse(self.page.as_deref())
    }
}

/// `POST /questions` is either a search (non-empty `searchTerm`) or a create.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsPostBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<WireId>,
    pub difficulty: Option<WireInt>,
    pub rating: Option<WireInt>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("missing field `{field}`")))
}

impl QuestionsPostBody {
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` when `question`, `answer`, `category`,
    /// or `difficulty` is absent.
    pub fn into_draft(self) -> Result<QuestionDraft, ApiError> {
        Ok(QuestionDraft {
            text: required(self.question, "question")?,
            answer: required(self.answer, "answer")?,
            category_id: CategoryId::new(required(self.category, "category")?.0),
            difficulty: required(self.difficulty, "difficulty")?.0,
            rating: self.rating.map(|r| r.0),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewCategoryBody {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
    pub id: Option<WireId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizBody {
    pub previous_questions: Option<Vec<WireId>>,
    pub quiz_category: Option<QuizCategoryBody>,
}

impl QuizBody {
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` when either field (or the category id)
    /// is missing.
    pub fn into_request(self) -> Result<QuizSelectionRequest, ApiError> {
        let previous = required(self.previous_questions, "previous_questions")?;
        let category = required(self.quiz_category, "quiz_category")?;
        let id = required(category.id, "quiz_category.id")?;
        Ok(QuizSelectionRequest::new(
            CategorySelector::from_wire(id.0),
            previous.into_iter().map(|id| QuestionId::new(id.0)),
        ))
    }
}

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub struct QuestionDto {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: Option<u64>,
    pub difficulty: u8,
    pub rating: Option<u8>,
}

impl From<&Question> for QuestionDto {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id().value(),
            question: q.text().to_owned(),
            answer: q.answer().to_owned(),
            category: q.category_id().map(|c| c.value()),
            difficulty: q.difficulty().value(),
            rating: q.rating().map(|r| r.value()),
        }
    }
}

#[must_use]
pub fn question_dtos(questions: &[Question]) -> Vec<QuestionDto> {
    questions.iter().map(QuestionDto::from).collect()
}

/// `{id: label}` keyed by category id.
#[must_use]
pub fn category_map(categories: &[Category]) -> BTreeMap<u64, String> {
    categories
        .iter()
        .map(|c| (c.id().value(), c.label().to_owned()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
    pub current_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<u64, String>>,
}

#[derive(Debug, Serialize)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: u64,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: u64,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<u64, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_categories: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}
