use std::fmt;

use services::{AppServices, CategoryServiceError, QuestionServiceError};
use thiserror::Error;
use tracing::info;
use trivia_core::model::{CategoryId, QuestionDraft};

pub const CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// `(category index, question, answer, difficulty)`
const QUESTIONS: &[(usize, &str, &str, i64)] = &[
    (0, "What is the heaviest organ in the human body?", "The Liver", 4),
    (0, "Who discovered penicillin?", "Alexander Fleming", 3),
    (0, "Hematology is a branch of medicine involving the study of what?", "Blood", 4),
    (1, "Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 1),
    (1, "La Giaconda is better known as what?", "Mona Lisa", 3),
    (1, "How many paintings did Van Gogh sell in his lifetime?", "One", 4),
    (2, "What is the largest lake in Africa?", "Lake Victoria", 2),
    (2, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3),
    (2, "The Taj Mahal is located in which Indian city?", "Agra", 2),
    (3, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2),
    (3, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4),
    (3, "Who invented Peanut Butter?", "George Washington Carver", 2),
    (4, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 1),
    (4, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 4),
    (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 4),
    (5, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3),
    (5, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 4),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Category(#[from] CategoryServiceError),
    #[error(transparent)]
    Question(#[from] QuestionServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReport {
    Seeded { categories: usize, questions: usize },
    AlreadyPopulated { categories: usize },
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seeded {
                categories,
                questions,
            } => write!(f, "seeded {categories} categories and {questions} questions"),
            Self::AlreadyPopulated { categories } => {
                write!(f, "database already has {categories} categories; nothing to do")
            }
        }
    }
}

/// Insert the standard categories and starter questions.
///
/// Does nothing when any category already exists.
///
/// # Errors
///
/// Propagates the first service failure.
pub async fn seed(services: &AppServices) -> Result<SeedReport, SeedError> {
    let categories = services.categories();
    let existing = categories.list_categories().await?;
    if !existing.is_empty() {
        return Ok(SeedReport::AlreadyPopulated {
            categories: existing.len(),
        });
    }

    let mut ids: Vec<CategoryId> = Vec::with_capacity(CATEGORIES.len());
    for label in CATEGORIES {
        ids.push(categories.create_category(label.to_owned()).await?);
    }

    let questions = services.questions();
    for &(category, text, answer, difficulty) in QUESTIONS {
        questions
            .create_question(QuestionDraft {
                text: text.to_owned(),
                answer: answer.to_owned(),
                category_id: ids[category],
                difficulty,
                rating: None,
            })
            .await?;
    }

    let report = SeedReport::Seeded {
        categories: ids.len(),
        questions: QUESTIONS.len(),
    };
    info!(%report, "seed complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;
    use trivia_core::PageNumber;

    #[tokio::test]
    async fn seeds_once() {
        let services = AppServices::from_storage(&Storage::in_memory(), 10).unwrap();

        let first = seed(&services).await.unwrap();
        assert_eq!(
            first,
            SeedReport::Seeded {
                categories: CATEGORIES.len(),
                questions: QUESTIONS.len(),
            }
        );

        let second = seed(&services).await.unwrap();
        assert_eq!(
            second,
            SeedReport::AlreadyPopulated {
                categories: CATEGORIES.len()
            }
        );

        let page = services.questions().overview(PageNumber::FIRST).await.unwrap();
        assert_eq!(page.total, QUESTIONS.len());
    }

    #[test]
    fn every_starter_question_points_at_a_category() {
        assert!(QUESTIONS.iter().all(|q| q.0 < CATEGORIES.len()));
        assert!(CATEGORIES.iter().all(|c| QUESTIONS.iter().any(|q| CATEGORIES[q.0] == *c)));
    }
}
