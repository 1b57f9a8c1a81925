// src/engine/leaderboard.rs

use crate::{
    error::AppError,
    models::{
        leaderboard::{Leaderboard, NamedEntry},
        score::ScoreRow,
    },
    services::directory::MemberDirectory,
};

use super::store::ScoreStore;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Ranks in one group, names resolved in that group.
pub async fn build_group_leaderboard(
    store: &ScoreStore,
    directory: &dyn MemberDirectory,
    group_id: i64,
    top_n: usize,
) -> Result<Leaderboard, AppError> {
    let rows = store.list_by_group(group_id).await?;
    Ok(name_top_entries(rows, directory, group_id, top_n).await)
}

/// Best score per user across all groups, names resolved in `chat_id`
/// (the chat the request came from).
pub async fn build_global_leaderboard(
    store: &ScoreStore,
    directory: &dyn MemberDirectory,
    chat_id: i64,
    top_n: usize,
) -> Result<Leaderboard, AppError> {
    let rows = store.list_best_per_user_global().await?;
    Ok(name_top_entries(rows, directory, chat_id, top_n).await)
}

/// Walks `rows` in order collecting up to `top_n` entries with a resolvable
/// name. Ids whose lookup fails are skipped and the next row moves up.
async fn name_top_entries(
    rows: Vec<ScoreRow>,
    directory: &dyn MemberDirectory,
    chat_id: i64,
    top_n: usize,
) -> Leaderboard {
    let mut entries = Vec::with_capacity(top_n.min(rows.len()));

    for row in &rows {
        if entries.len() >= top_n {
            break;
        }
        match directory.display_name(chat_id, row.user_id).await {
            Ok(display_name) => entries.push(NamedEntry {
                user_id: row.user_id,
                display_name,
                points: row.points,
                medal: MEDALS.get(entries.len()).copied(),
            }),
            Err(e) => tracing::debug!("Skipping leaderboard entry: {}", e),
        }
    }

    Leaderboard {
        ranking: rows.iter().map(|row| row.user_id).collect(),
        entries,
    }
}
