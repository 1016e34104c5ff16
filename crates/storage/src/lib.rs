#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{CategoryRepository, InMemoryRepository, QuestionRepository, Storage, StorageError};
