use std::sync::Arc;

use rand::Rng;
use storage::repository::{CategoryRepository, QuestionRepository};
use tracing::debug;
use trivia_core::model::Question;
use trivia_core::{CategorySelector, QuizEngine, QuizOutcome, QuizSelectionRequest};

use crate::error::QuizError;

/// What to show next in a quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Question(Question),
    /// The session served every question in its pool.
    Finished,
}

/// Serves quiz questions from the store. Holds no per-session state.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions,
            categories,
        }
    }

    /// Pick a question the caller has not been served yet.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CategoryNotFound` for an unknown category.
    /// Returns `QuizError::NoQuestions` if the selected pool is empty.
    /// Returns `QuizError::Storage` if repository access fails.
    pub async fn next_question(&self, request: &QuizSelectionRequest) -> Result<QuizStep, QuizError> {
        if let CategorySelector::Category(id) = request.selector {
            if self.categories.get_category(id).await?.is_none() {
                return Err(QuizError::CategoryNotFound(id));
            }
        }
        let snapshot = self.questions.list_questions().await?;
        select(&snapshot, request, &mut rand::rng())
    }
}

fn select<R: Rng + ?Sized>(
    snapshot: &[Question],
    request: &QuizSelectionRequest,
    rng: &mut R,
) -> Result<QuizStep, QuizError> {
    match QuizEngine::new(snapshot).next_question(request, rng) {
        QuizOutcome::Question(question) => {
            debug!(
                question_id = %question.id(),
                served = request.excluded_ids.len(),
                "quiz question selected"
            );
            Ok(QuizStep::Question(question.clone()))
        }
        QuizOutcome::Exhausted => {
            debug!(served = request.excluded_ids.len(), "quiz pool exhausted");
            Ok(QuizStep::Finished)
        }
        QuizOutcome::NoQuestions => Err(QuizError::NoQuestions),
    }
}
