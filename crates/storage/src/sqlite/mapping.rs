use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use trivia_core::model::{Category, CategoryId, Question, QuestionId};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn category_id_from_i64(v: i64) -> Result<CategoryId, StorageError> {
    Ok(CategoryId::new(i64_to_u64("category_id", v)?))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    u64_to_i64("question_id", id.value())
}

pub(crate) fn category_id_to_i64(id: CategoryId) -> Result<i64, StorageError> {
    u64_to_i64("category_id", id.value())
}

/// Map a driver error, keeping constraint violations distinct from I/O failures.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() || db.is_check_violation() => {
            StorageError::Conflict(db.message().to_owned())
        }
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn map_category_row(row: &SqliteRow) -> Result<Category, StorageError> {
    let id = category_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let label: String = row.try_get("type").map_err(ser)?;
    Category::new(id, label).map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let id = question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let category = row
        .try_get::<Option<i64>, _>("category")
        .map_err(ser)?
        .map(category_id_from_i64)
        .transpose()?;

    Question::from_persisted(
        id,
        row.try_get::<String, _>("question").map_err(ser)?,
        row.try_get::<String, _>("answer").map_err(ser)?,
        category,
        row.try_get::<i64, _>("difficulty").map_err(ser)?,
        row.try_get::<Option<i64>, _>("rating").map_err(ser)?,
    )
    .map_err(ser)
}
