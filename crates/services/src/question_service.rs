use std::sync::Arc;

use storage::repository::{CategoryRepository, QuestionRepository, StorageError};
use tracing::{debug, info};
use trivia_core::filter::{self, SearchTerm};
use trivia_core::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::{PageNumber, paginate};

use crate::error::QuestionServiceError;

/// One page of questions plus the size of the full (filtered) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: usize,
    pub current_category: Option<Category>,
}

impl QuestionPage {
    fn build(
        all: &[Question],
        page: PageNumber,
        page_size: usize,
        current_category: Option<Category>,
    ) -> Self {
        Self {
            questions: paginate(all, page, page_size).to_vec(),
            total: all.len(),
            current_category,
        }
    }
}

/// Orchestrates question browsing, search, creation, and deletion.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    page_size: usize,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        page_size: usize,
    ) -> Self {
        Self {
            questions,
            categories,
            page_size,
        }
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    async fn first_category(&self) -> Result<Option<Category>, StorageError> {
        Ok(self.categories.list_categories().await?.into_iter().next())
    }

    /// A page of all questions ordered by id. Any empty page is an error.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::PageOutOfRange` if the page has no items.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_page(&self, page: PageNumber) -> Result<QuestionPage, QuestionServiceError> {
        let view = self.overview(page).await?;
        if view.questions.is_empty() {
            return Err(QuestionServiceError::PageOutOfRange(page));
        }
        Ok(view)
    }

    /// A page of all questions without the empty-page check, used to echo the
    /// collection after a mutation.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn overview(&self, page: PageNumber) -> Result<QuestionPage, QuestionServiceError> {
        let all = self.questions.list_questions().await?;
        let current = self.first_category().await?;
        Ok(QuestionPage::build(&all, page, self.page_size, current))
    }

    /// Questions whose text contains `term`, ignoring case.
    ///
    /// An empty first page is a valid "no matches" result.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::PageOutOfRange` for an empty page past the first.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn search(
        &self,
        term: &SearchTerm,
        page: PageNumber,
    ) -> Result<QuestionPage, QuestionServiceError> {
        let matches = filter::by_substring(self.questions.list_questions().await?, term);
        debug!(term = term.as_str(), hits = matches.len(), "question search");
        let current = self.first_category().await?;
        let view = QuestionPage::build(&matches, page, self.page_size, current);
        ensure_in_range(view, page)
    }

    /// Questions in one category.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::CategoryNotFound` if the category does not exist.
    /// Returns `QuestionServiceError::PageOutOfRange` for an empty page past the first.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: PageNumber,
    ) -> Result<QuestionPage, QuestionServiceError> {
        let category = self
            .categories
            .get_category(category_id)
            .await?
            .ok_or(QuestionServiceError::CategoryNotFound(category_id))?;
        let in_category = filter::by_category(self.questions.list_questions().await?, category_id);
        let view = QuestionPage::build(&in_category, page, self.page_size, Some(category));
        ensure_in_range(view, page)
    }

    /// Validate and persist a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures.
    /// Returns `QuestionServiceError::UnknownCategory` if the category does not exist.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<QuestionId, QuestionServiceError> {
        let validated = draft.validate()?;
        let category_id = validated.category_id;
        if self.categories.get_category(category_id).await?.is_none() {
            return Err(QuestionServiceError::UnknownCategory(category_id));
        }
        let id = self.questions.insert_new_question(&validated).await?;
        info!(question_id = %id, category_id = %category_id, "question created");
        Ok(id)
    }

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::QuestionNotFound` if no such question exists.
    /// Returns `QuestionServiceError::Storage` if the delete fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        match self.questions.delete_question(id).await {
            Ok(()) => {
                info!(question_id = %id, "question deleted");
                Ok(())
            }
            Err(StorageError::NotFound) => Err(QuestionServiceError::QuestionNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

fn ensure_in_range(
    view: QuestionPage,
    page: PageNumber,
) -> Result<QuestionPage, QuestionServiceError> {
    if view.questions.is_empty() && !page.is_first() {
        return Err(QuestionServiceError::PageOutOfRange(page));
    }
    Ok(view)
}
