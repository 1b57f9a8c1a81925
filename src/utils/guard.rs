// src/utils/guard.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::member::ChatKind,
    services::directory::{InMemoryDirectory, MemberDirectory},
    utils::extract::ApiPath,
};

/// Header carrying the id of the chat user who issued the command.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
pub struct GroupPath {
    pub group_id: i64,
}

/// Precondition: the command was sent from a group chat.
pub async fn require_group(directory: &dyn MemberDirectory, chat_id: i64) -> Result<(), AppError> {
    match directory.chat_kind(chat_id).await {
        Ok(ChatKind::Group) => Ok(()),
        Ok(ChatKind::Private) | Err(_) => Err(AppError::Forbidden(
            "This command only works in groups!".to_string(),
        )),
    }
}

/// Precondition: `user_id` administers `chat_id`.
pub async fn require_admin(
    directory: &dyn MemberDirectory,
    chat_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    match directory.member_status(chat_id, user_id).await {
        Ok(status) if status.is_admin() => Ok(()),
        _ => Err(AppError::Forbidden("This is an ADMIN ONLY command!".to_string())),
    }
}

pub fn acting_user(headers: &HeaderMap) -> Result<i64, AppError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest(format!("Missing or invalid {USER_ID_HEADER} header")))
}

/// Axum Middleware: group-only commands.
pub async fn group_only(
    State(directory): State<InMemoryDirectory>,
    ApiPath(path): ApiPath<GroupPath>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    require_group(&directory, path.group_id).await.inspect_err(|_| {
        tracing::warn!(chat_id = path.group_id, "rejected group-only command outside a group");
    })?;
    Ok(next.run(req).await)
}

/// Axum Middleware: admin-only group commands.
///
/// Runs the group stage first, then checks the acting user's status.
pub async fn group_admin_only(
    State(directory): State<InMemoryDirectory>,
    ApiPath(path): ApiPath<GroupPath>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    require_group(&directory, path.group_id).await?;
    let user_id = acting_user(req.headers())?;
    require_admin(&directory, path.group_id, user_id)
        .await
        .inspect_err(|_| {
            tracing::warn!(chat_id = path.group_id, user_id, "rejected admin command");
        })?;
    Ok(next.run(req).await)
}
