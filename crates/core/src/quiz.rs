//! Next-question selection for a quiz session.
//!
//! The engine is stateless: the caller carries the set of already-served ids
//! between calls and adds each returned id before asking again.

use std::collections::HashSet;

use rand::Rng;

use crate::model::{CategoryId, Question, QuestionId};

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategorySelector {
    All,
    Category(CategoryId),
}

impl CategorySelector {
    /// Wire id `0` selects every category.
    #[must_use]
    pub fn from_wire(id: u64) -> Self {
        if id == 0 {
            Self::All
        } else {
            Self::Category(CategoryId::new(id))
        }
    }

    #[must_use]
    pub fn includes(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => question.category_id() == Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSelectionRequest {
    pub selector: CategorySelector,
    pub excluded_ids: HashSet<QuestionId>,
}

impl QuizSelectionRequest {
    #[must_use]
    pub fn new(selector: CategorySelector, excluded_ids: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            selector,
            excluded_ids: excluded_ids.into_iter().collect(),
        }
    }
}

/// Result of a single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome<'a> {
    /// A question that has not been served in this session.
    Question(&'a Question),
    /// Every question in the pool has been served. A normal end of session.
    Exhausted,
    /// The pool itself is empty.
    NoQuestions,
}

/// Selects questions from a fixed snapshot of the store.
pub struct QuizEngine<'a> {
    questions: &'a [Question],
}

impl<'a> QuizEngine<'a> {
    #[must_use]
    pub fn new(questions: &'a [Question]) -> Self {
        Self { questions }
    }

    /// Candidate pool for `selector`, in snapshot order.
    pub fn pool(&self, selector: CategorySelector) -> impl Iterator<Item = &'a Question> + use<'a> {
        self.questions.iter().filter(move |q| selector.includes(q))
    }

    /// Pick the next question uniformly among pool members not yet served.
    ///
    /// Exhaustion is decided from the eligible subset, so excluded ids that
    /// belong to other categories (or no longer exist) have no effect.
    pub fn next_question<R: Rng + ?Sized>(
        &self,
        request: &QuizSelectionRequest,
        rng: &mut R,
    ) -> QuizOutcome<'a> {
        let mut total = 0usize;
        let eligible: Vec<&'a Question> = self
            .pool(request.selector)
            .inspect(|_| total += 1)
            .filter(|q| !request.excluded_ids.contains(&q.id()))
            .collect();

        if total == 0 {
            return QuizOutcome::NoQuestions;
        }
        if eligible.is_empty() {
            return QuizOutcome::Exhausted;
        }

        let index = rng.random_range(0..eligible.len());
        QuizOutcome::Question(eligible[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn question(id: u64, category: u64) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Q{id}"),
            format!("A{id}"),
            Some(CategoryId::new(category)),
            1,
            None,
        )
        .unwrap()
    }

    fn scenario_pool() -> Vec<Question> {
        vec![question(1, 1), question(2, 1), question(3, 2)]
    }

    fn cat(id: u64) -> CategorySelector {
        CategorySelector::Category(CategoryId::new(id))
    }

    fn ids(raw: &[u64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn zero_selects_all_categories() {
        assert_eq!(CategorySelector::from_wire(0), CategorySelector::All);
        assert_eq!(CategorySelector::from_wire(4), cat(4));
    }

    #[test]
    fn picks_only_from_requested_category() {
        let questions = scenario_pool();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let request = QuizSelectionRequest::new(cat(1), Vec::new());
            match engine.next_question(&request, &mut rng) {
                QuizOutcome::Question(q) => assert!(matches!(q.id().value(), 1 | 2)),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn exhausts_after_every_pool_member_is_served() {
        let questions = scenario_pool();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(1);
        let request = QuizSelectionRequest::new(cat(1), ids(&[1, 2]));
        assert_eq!(engine.next_question(&request, &mut rng), QuizOutcome::Exhausted);
    }

    #[test]
    fn empty_pool_is_distinct_from_exhaustion() {
        let questions = scenario_pool();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(1);
        let request = QuizSelectionRequest::new(cat(9), Vec::new());
        assert_eq!(engine.next_question(&request, &mut rng), QuizOutcome::NoQuestions);

        let empty: Vec<Question> = Vec::new();
        let request = QuizSelectionRequest::new(CategorySelector::All, Vec::new());
        assert_eq!(
            QuizEngine::new(&empty).next_question(&request, &mut rng),
            QuizOutcome::NoQuestions
        );
    }

    #[test]
    fn foreign_exclusions_do_not_end_the_session_early() {
        // Two excluded ids, two questions in the pool, but only one of the
        // exclusions belongs to the pool.
        let questions = scenario_pool();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(3);
        let request = QuizSelectionRequest::new(cat(1), ids(&[1, 3]));
        match engine.next_question(&request, &mut rng) {
            QuizOutcome::Question(q) => assert_eq!(q.id(), QuestionId::new(2)),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn unknown_exclusions_are_ignored() {
        let questions = scenario_pool();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(3);
        let request = QuizSelectionRequest::new(CategorySelector::All, ids(&[100, 200, 300]));
        assert!(matches!(
            engine.next_question(&request, &mut rng),
            QuizOutcome::Question(_)
        ));
    }

    #[test]
    fn simulated_sessions_never_repeat() {
        let questions: Vec<Question> = (1..=30).map(|id| question(id, id % 3 + 1)).collect();
        let engine = QuizEngine::new(&questions);
        for (seed, selector) in [(11, CategorySelector::All), (12, cat(1)), (13, cat(2))] {
            let mut rng = StdRng::seed_from_u64(seed);
            let expected = engine.pool(selector).count();
            let mut request = QuizSelectionRequest::new(selector, Vec::new());
            let mut served = Vec::new();
            loop {
                match engine.next_question(&request, &mut rng) {
                    QuizOutcome::Question(q) => {
                        assert!(request.excluded_ids.insert(q.id()), "{:?} repeated", q.id());
                        served.push(q.id());
                    }
                    QuizOutcome::Exhausted => break,
                    QuizOutcome::NoQuestions => panic!("pool should not be empty"),
                }
            }
            assert_eq!(served.len(), expected);
        }
    }

    #[test]
    fn selection_is_roughly_uniform_over_eligible_questions() {
        let questions: Vec<Question> = (1..=4).map(|id| question(id, 1)).collect();
        let engine = QuizEngine::new(&questions);
        let mut rng = StdRng::seed_from_u64(42);
        let request = QuizSelectionRequest::new(cat(1), ids(&[1]));
        let mut counts: HashMap<QuestionId, u32> = HashMap::new();
        let draws = 6_000;
        for _ in 0..draws {
            if let QuizOutcome::Question(q) = engine.next_question(&request, &mut rng) {
                *counts.entry(q.id()).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 3);
        assert!(!counts.contains_key(&QuestionId::new(1)));
        for count in counts.values() {
            // expected 2000 each
            assert!((1700..=2300).contains(count), "skewed counts: {counts:?}");
        }
    }
}
