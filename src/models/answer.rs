// src/models/answer.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Scoring metadata for a question that has been sent to a chat and may still
/// receive answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub group_id: i64,
    pub correct_option: usize,
    pub points: i64,
}

/// A user's selection of one option on an issued question.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEvent {
    pub question_id: String,
    pub user_id: i64,
    /// Chat the answer came from, when the platform reports it.
    /// The owning group recorded at issuance is authoritative.
    #[serde(default)]
    pub group_id: Option<i64>,
    pub chosen_option: usize,
}

/// Result of processing one answer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Correct answer; carries the user's new total in the question's group.
    Scored { total: i64 },
    Incorrect,
    /// Late, duplicate, expired or never-issued question.
    UnknownQuestion,
}

/// DTO for registering an issued question.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterQuestionRequest {
    #[validate(length(min = 1, max = 128))]
    pub question_id: String,
    pub correct_option: usize,
    #[validate(range(min = 1, max = 100))]
    pub points: i64,
}
