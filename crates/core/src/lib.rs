#![forbid(unsafe_code)]

pub mod filter;
pub mod model;
pub mod pagination;
pub mod quiz;

pub use filter::SearchTerm;
pub use pagination::{DEFAULT_PAGE_SIZE, PageError, PageNumber, paginate};
pub use quiz::{CategorySelector, QuizEngine, QuizOutcome, QuizSelectionRequest};
