// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'player_scores' table in the database.
/// One row per (user, group) pair that has answered correctly at least once.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerScore {
    pub user_id: i64,
    pub group_id: i64,
    pub points: i64,
    pub updated_at: chrono::NaiveDateTime,
}

/// A ranked `(user_id, points)` pair, as read from the store for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct ScoreRow {
    pub user_id: i64,
    pub points: i64,
}
