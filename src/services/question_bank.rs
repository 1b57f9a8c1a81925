// src/services/question_bank.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::question::{CHOICE_SEPARATOR, CreateQuestionRequest, DrawnQuestion, QuestionRecord},
};

/// Questions stored alongside the scores, drawn uniformly at random.
#[derive(Clone)]
pub struct QuestionBank {
    pool: SqlitePool,
}

impl QuestionBank {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Picks one question of `question_type` at random.
    pub async fn draw(&self, question_type: &str) -> Result<DrawnQuestion, AppError> {
        let record = sqlx::query_as::<_, QuestionRecord>(
            r#"
            SELECT id, question_type, subject, content, choices, answer, points, difficulty
            FROM questions
            WHERE question_type = ?
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(question_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {question_type} questions available")))?;

        let id = record.id;
        record.into_drawn().ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Question {id} has an answer that is not among its choices"
            ))
        })
    }

    /// Stores a validated question and returns its id.
    pub async fn add(
        &self,
        question_type: &str,
        req: &CreateQuestionRequest,
    ) -> Result<i64, AppError> {
        let choices = req.choices.join(&CHOICE_SEPARATOR.to_string());

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions (question_type, subject, content, choices, answer, points, difficulty)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(question_type)
        .bind(&req.subject)
        .bind(&req.content)
        .bind(choices)
        .bind(&req.answer)
        .bind(req.points)
        .bind(&req.difficulty)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::StorageUnavailable(e.to_string())
        })?;

        Ok(id)
    }
}
