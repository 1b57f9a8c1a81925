// src/handlers/leaderboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    engine::{
        leaderboard::{build_global_leaderboard, build_group_leaderboard},
        rank::evaluate,
    },
    error::AppError,
    models::leaderboard::{
        GlobalLeaderboardParams, GroupLeaderboardParams, Leaderboard, LeaderboardResponse,
    },
    state::AppState,
    utils::extract::{ApiPath, ApiQuery},
};

const EMPTY_MESSAGE: &str = "No one played yet! Start playing now! 🐻";

fn respond(board: Leaderboard, user_id: i64) -> LeaderboardResponse {
    let standing = evaluate(user_id, &board.ranking);
    LeaderboardResponse {
        standing,
        message: standing.message(),
        empty_message: board.entries.is_empty().then_some(EMPTY_MESSAGE),
        entries: board.entries,
    }
}

/// Top players of one group plus the requester's standing in it.
pub async fn group_leaderboard(
    State(state): State<AppState>,
    ApiPath(group_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<GroupLeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let board = build_group_leaderboard(
        &state.store,
        &state.directory,
        group_id,
        state.config.leaderboard_size,
    )
    .await?;

    Ok(Json(respond(board, params.user_id)))
}

/// Best score per user across every group.
pub async fn global_leaderboard(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GlobalLeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let board = build_global_leaderboard(
        &state.store,
        &state.directory,
        params.chat_id,
        state.config.leaderboard_size,
    )
    .await?;

    Ok(Json(respond(board, params.user_id)))
}

/// Current points of one user in one group, with the time of the last award.
pub async fn get_score(
    State(state): State<AppState>,
    ApiPath((group_id, user_id)): ApiPath<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .store
        .get_record(user_id, group_id)
        .await?
        .ok_or(AppError::NotFound("No score recorded".to_string()))?;

    Ok(Json(record))
}
