// src/handlers/quiz.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::QUIZ_QUESTION_TYPE,
    engine::{processor::AnswerProcessor, registry::QuestionRegistry},
    error::AppError,
    models::answer::{ActiveQuestion, AnswerEvent, RegisterQuestionRequest},
    services::question_bank::QuestionBank,
    utils::extract::{ApiJson, ApiPath},
};

/// Draws a random multiple-choice question for the adapter to send as a poll.
pub async fn draw_question(State(bank): State<QuestionBank>) -> Result<impl IntoResponse, AppError> {
    let question = bank.draw(QUIZ_QUESTION_TYPE).await?;
    Ok(Json(question))
}

/// Registers a question that has just been sent to a group.
///
/// `question_id` is the platform's poll id; answers will reference it.
pub async fn register_question(
    State(registry): State<QuestionRegistry>,
    ApiPath(group_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RegisterQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    registry.register(
        payload.question_id.clone(),
        ActiveQuestion {
            group_id,
            correct_option: payload.correct_option,
            points: payload.points,
        },
    );
    tracing::info!(question_id = %payload.question_id, group_id, "question issued");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "question_id": payload.question_id })),
    ))
}

/// Receives one poll answer.
///
/// Unknown questions are not an error: the outcome says so and nothing is scored.
pub async fn submit_answer(
    State(processor): State<AnswerProcessor>,
    ApiJson(event): ApiJson<AnswerEvent>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = processor.process_answer(&event).await?;
    Ok(Json(outcome))
}
