// src/engine/store.rs

use std::future::Future;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::score::{PlayerScore, ScoreRow},
};

/// Durable cumulative points per (user, group).
///
/// Every call is a single statement bounded by `timeout`; failures and
/// timeouts surface as `AppError::StorageUnavailable`.
#[derive(Clone)]
pub struct ScoreStore {
    pool: SqlitePool,
    timeout: Duration,
}

impl ScoreStore {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bounded<T>(
        &self,
        what: &str,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(|e| classify(what, e)),
            Err(_) => {
                tracing::error!("Timed out after {:?} trying to {}", self.timeout, what);
                Err(AppError::StorageUnavailable(format!("{what}: timed out")))
            }
        }
    }

    /// Current points, or `None` if the user never scored in this group.
    pub async fn get_score(&self, user_id: i64, group_id: i64) -> Result<Option<i64>, AppError> {
        self.bounded(
            "fetch score",
            sqlx::query_scalar::<_, i64>(
                "SELECT points FROM player_scores WHERE user_id = ? AND group_id = ?",
            )
            .bind(user_id)
            .bind(group_id)
            .fetch_optional(&self.pool),
        )
        .await
    }

    pub async fn get_record(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<Option<PlayerScore>, AppError> {
        self.bounded(
            "fetch score record",
            sqlx::query_as::<_, PlayerScore>(
                r#"
                SELECT user_id, group_id, points, updated_at
                FROM player_scores
                WHERE user_id = ? AND group_id = ?
                "#,
            )
            .bind(user_id)
            .bind(group_id)
            .fetch_optional(&self.pool),
        )
        .await
    }

    /// Adds `points` to the (user, group) total, creating the row on first
    /// score, and returns the new total.
    ///
    /// Insert-or-increment is one statement, so concurrent awards on the
    /// same key serialize in the database and none is lost. An award that
    /// would overflow the total updates nothing and is rejected.
    pub async fn apply_correct_answer(
        &self,
        user_id: i64,
        group_id: i64,
        points: i64,
    ) -> Result<i64, AppError> {
        if points < 1 {
            return Err(AppError::BadRequest(format!(
                "Point value must be positive, got {points}"
            )));
        }

        self.bounded(
            "apply correct answer",
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO player_scores (user_id, group_id, points)
                VALUES (?, ?, ?)
                ON CONFLICT(user_id, group_id) DO UPDATE SET
                    points = player_scores.points + excluded.points,
                    updated_at = CURRENT_TIMESTAMP
                WHERE player_scores.points <= 9223372036854775807 - excluded.points
                RETURNING points
                "#,
            )
            .bind(user_id)
            .bind(group_id)
            .bind(points)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Awarding {points} points would overflow the total of user {user_id} in group {group_id}"
            ))
        })
    }

    /// All players of one group, highest points first.
    pub async fn list_by_group(&self, group_id: i64) -> Result<Vec<ScoreRow>, AppError> {
        self.bounded(
            "list group scores",
            sqlx::query_as::<_, ScoreRow>(
                r#"
                SELECT user_id, points
                FROM player_scores
                WHERE group_id = ?
                ORDER BY points DESC, user_id ASC
                "#,
            )
            .bind(group_id)
            .fetch_all(&self.pool),
        )
        .await
    }

    /// Each user's best group total, highest first.
    pub async fn list_best_per_user_global(&self) -> Result<Vec<ScoreRow>, AppError> {
        self.bounded(
            "list global scores",
            sqlx::query_as::<_, ScoreRow>(
                r#"
                SELECT user_id, MAX(points) AS points
                FROM player_scores
                GROUP BY user_id
                ORDER BY points DESC, user_id ASC
                "#,
            )
            .fetch_all(&self.pool),
        )
        .await
    }
}

/// Constraint violations are caller errors; everything else is the store
/// being unreachable.
fn classify(what: &str, e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_check_violation() => {
            tracing::warn!("Rejected write while trying to {}: {}", what, db);
            AppError::BadRequest(db.message().to_string())
        }
        _ => {
            tracing::error!("Failed to {}: {:?}", what, e);
            AppError::StorageUnavailable(e.to_string())
        }
    }
}
