use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("difficulty must be between {min} and {max}, got {0}", min = Difficulty::MIN, max = Difficulty::MAX)]
    InvalidDifficulty(i64),

    #[error("rating must be between {min} and {max}, got {0}", min = Rating::MIN, max = Rating::MAX)]
    InvalidRating(i64),
}

//
// ─── SCALARS ───────────────────────────────────────────────────────────────────
//

/// How hard a question is, on a small positive scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` outside `MIN..=MAX`.
    pub fn new(value: i64) -> Result<Self, QuestionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionError::InvalidDifficulty(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Optional community rating attached to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidRating` outside `MIN..=MAX`.
    pub fn new(value: i64) -> Result<Self, QuestionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionError::InvalidRating(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated input for a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: String,
    pub category_id: CategoryId,
    pub difficulty: i64,
    pub rating: Option<i64>,
}

impl QuestionDraft {
    /// Check field-level constraints. Category existence is a storage concern
    /// and is checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for empty text/answer or out-of-range scalars.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        let difficulty = Difficulty::new(self.difficulty)?;
        let rating = self.rating.map(Rating::new).transpose()?;

        Ok(ValidatedQuestion {
            text: self.text,
            answer: self.answer,
            category_id: self.category_id,
            difficulty,
            rating,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub text: String,
    pub answer: String,
    pub category_id: CategoryId,
    pub difficulty: Difficulty,
    pub rating: Option<Rating>,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category_id: Some(self.category_id),
            difficulty: self.difficulty,
            rating: self.rating,
        }
    }
}

/// A stored trivia question.
///
/// `category_id` is optional because persisted rows may predate or outlive
/// their category; such questions only appear in the "all categories" pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    answer: String,
    category_id: Option<CategoryId>,
    difficulty: Difficulty,
    rating: Option<Rating>,
}

impl Question {
    /// Rebuild a question from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted values violate invariants.
    pub fn from_persisted(
        id: QuestionId,
        text: String,
        answer: String,
        category_id: Option<CategoryId>,
        difficulty: i64,
        rating: Option<i64>,
    ) -> Result<Self, QuestionError> {
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        Ok(Self {
            id,
            text,
            answer,
            category_id,
            difficulty: Difficulty::new(difficulty)?,
            rating: rating.map(Rating::new).transpose()?,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
