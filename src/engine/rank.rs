// src/engine/rank.rs

use serde::Serialize;

/// Ranks 1 through 3 earn a podium message.
pub const PODIUM_SIZE: usize = 3;

/// Where a user sits in an ordered leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", content = "rank", rename_all = "snake_case")]
pub enum Standing {
    Unranked,
    Podium(usize),
    Ranked(usize),
}

/// Computes the 1-based rank of `user_id` in `ordered_ids`.
///
/// Only the first occurrence counts. An id that never appears, including
/// in an empty sequence, is `Unranked`.
pub fn evaluate(user_id: i64, ordered_ids: &[i64]) -> Standing {
    match ordered_ids.iter().position(|&id| id == user_id) {
        None => Standing::Unranked,
        Some(index) if index < PODIUM_SIZE => Standing::Podium(index + 1),
        Some(index) => Standing::Ranked(index + 1),
    }
}

impl Standing {
    pub fn rank(self) -> Option<usize> {
        match self {
            Standing::Unranked => None,
            Standing::Podium(rank) | Standing::Ranked(rank) => Some(rank),
        }
    }

    /// Congratulation text shown to the user who asked for the leaderboard.
    pub fn message(self) -> String {
        match self {
            Standing::Unranked => {
                "You are not on the leaderboard! Get up there by trying some of our questions!"
                    .to_string()
            }
            Standing::Podium(rank) => {
                format!("Congrats! You are on the podium! Proudly at rank {rank}!")
            }
            Standing::Ranked(rank) => {
                format!("Nice! You are at rank {rank}! Keep the hustle on!")
            }
        }
    }
}
