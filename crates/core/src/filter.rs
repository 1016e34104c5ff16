//! Question filters used by the browsing, search, and quiz workflows.
//!
//! Both filters preserve input order; callers are expected to pass questions
//! sorted by id.

use crate::model::{CategoryId, Question};

/// A non-empty, case-folded search needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Returns `None` for an empty term: that means "no search requested",
    /// never "match everything".
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return None;
        }
        let folded = raw.to_lowercase();
        Some(Self { raw, folded })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }
}

/// Questions belonging to `category`.
///
/// Does not check that the category exists; an unknown id and an empty
/// category both yield an empty result here.
pub fn by_category(
    items: impl IntoIterator<Item = Question>,
    category: CategoryId,
) -> Vec<Question> {
    items
        .into_iter()
        .filter(|q| q.category_id() == Some(category))
        .collect()
}

/// Questions whose text contains `term`, ignoring case.
pub fn by_substring(items: impl IntoIterator<Item = Question>, term: &SearchTerm) -> Vec<Question> {
    items
        .into_iter()
        .filter(|q| term.matches(q.text()))
        .collect()
}
