use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category type cannot be empty")]
    EmptyLabel,
}

/// Validated label for a category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    label: String,
}

impl NewCategory {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyLabel` when the label is blank.
    pub fn new(label: impl Into<String>) -> Result<Self, CategoryError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CategoryError::EmptyLabel);
        }
        Ok(Self { label })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn assign_id(self, id: CategoryId) -> Category {
        Category {
            id,
            label: self.label,
        }
    }
}

/// A question category ("Science", "Art", ...). Labels are not required to be
/// unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    label: String,
}

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyLabel` when the label is blank.
    pub fn new(id: CategoryId, label: impl Into<String>) -> Result<Self, CategoryError> {
        Ok(NewCategory::new(label)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
