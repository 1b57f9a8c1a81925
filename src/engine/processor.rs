// src/engine/processor.rs

use crate::{
    error::AppError,
    models::answer::{AnswerEvent, Outcome},
};

use super::{registry::QuestionRegistry, store::ScoreStore};

/// Applies answer events to the score store.
#[derive(Clone)]
pub struct AnswerProcessor {
    registry: QuestionRegistry,
    store: ScoreStore,
}

impl AnswerProcessor {
    pub fn new(registry: QuestionRegistry, store: ScoreStore) -> Self {
        Self { registry, store }
    }

    /// Scores one answer event.
    ///
    /// The question is retired before the answer is checked, so any later
    /// event for the same question yields `UnknownQuestion`. A storage
    /// failure loses the award; it is logged and returned, never retried.
    pub async fn process_answer(&self, event: &AnswerEvent) -> Result<Outcome, AppError> {
        let Some(question) = self.registry.resolve_and_retire(&event.question_id) else {
            tracing::debug!(
                question_id = %event.question_id,
                user_id = event.user_id,
                "ignoring answer for unknown question"
            );
            return Ok(Outcome::UnknownQuestion);
        };

        if let Some(group_id) = event.group_id {
            if group_id != question.group_id {
                tracing::warn!(
                    question_id = %event.question_id,
                    reported = group_id,
                    owner = question.group_id,
                    "answer reported from a different chat, scoring in the owning group"
                );
            }
        }

        if event.chosen_option != question.correct_option {
            return Ok(Outcome::Incorrect);
        }

        match self
            .store
            .apply_correct_answer(event.user_id, question.group_id, question.points)
            .await
        {
            Ok(total) => {
                tracing::info!(
                    user_id = event.user_id,
                    group_id = question.group_id,
                    points = question.points,
                    total,
                    "correct answer scored"
                );
                Ok(Outcome::Scored { total })
            }
            Err(e) => {
                tracing::warn!(
                    user_id = event.user_id,
                    group_id = question.group_id,
                    points = question.points,
                    "point award lost: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
