mod category;
mod ids;
mod question;

pub use ids::{CategoryId, QuestionId};

pub use category::{Category, CategoryError, NewCategory};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError, Rating, ValidatedQuestion};
