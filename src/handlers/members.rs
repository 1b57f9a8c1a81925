// src/handlers/members.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::member::UpsertMemberRequest,
    services::directory::InMemoryDirectory,
    utils::extract::{ApiJson, ApiPath},
};

/// Feeds the member directory with what the chat adapter knows about a user.
pub async fn upsert_member(
    State(directory): State<InMemoryDirectory>,
    ApiPath((chat_id, user_id)): ApiPath<(i64, i64)>,
    ApiJson(payload): ApiJson<UpsertMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    directory.upsert_member(
        chat_id,
        payload.kind,
        user_id,
        payload.display_name,
        payload.status,
    );

    Ok(StatusCode::NO_CONTENT)
}
