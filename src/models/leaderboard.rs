// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};

use crate::engine::rank::Standing;

/// A leaderboard entry whose display name resolved successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedEntry {
    pub user_id: i64,
    pub display_name: String,
    pub points: i64,
    /// 🥇🥈🥉 for the first three entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<&'static str>,
}

/// Ranked view of one scope.
///
/// `ranking` holds every user id in order, `entries` only the top names
/// that could be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub ranking: Vec<i64>,
    pub entries: Vec<NamedEntry>,
}

/// Response body for leaderboard requests.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub standing: Standing,
    pub message: String,
    pub entries: Vec<NamedEntry>,
    /// Present when nobody has scored in this scope yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct GroupLeaderboardParams {
    /// The user who asked; their standing is evaluated.
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct GlobalLeaderboardParams {
    /// Chat the command was sent from; names are resolved in this chat.
    pub chat_id: i64,
    pub user_id: i64,
}
