use trivia_core::model::{Question, QuestionId, ValidatedQuestion};

use super::SqliteRepository;
use super::mapping::{
    category_id_to_i64, db_err, map_question_row, question_id_from_i64, question_id_to_i64,
};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_new_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty, rating)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(question.text.as_str())
        .bind(question.answer.as_str())
        .bind(category_id_to_i64(question.category_id)?)
        .bind(i64::from(question.difficulty.value()))
        .bind(question.rating.map(|r| i64::from(r.value())))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let Ok(raw) = question_id_to_i64(id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty, rating
            FROM questions WHERE id = ?1
            ",
        )
        .bind(raw)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty, rating
            FROM questions
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let raw = question_id_to_i64(id).map_err(|_| StorageError::NotFound)?;
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(raw)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
