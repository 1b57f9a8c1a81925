// src/handlers/admin.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    config::QUIZ_QUESTION_TYPE, error::AppError, models::question::CreateQuestionRequest,
    services::question_bank::QuestionBank, utils::extract::ApiJson,
};

/// Creates a new quiz question.
/// Group admins only; the route is wrapped by the group and admin stages.
pub async fn create_question(
    State(bank): State<QuestionBank>,
    ApiJson(payload): ApiJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = bank.add(QUIZ_QUESTION_TYPE, &payload).await?;
    tracing::info!(id, subject = %payload.subject, "question added to bank");

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}
