// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Separator between choices in the `questions.choices` column.
pub const CHOICE_SEPARATOR: char = '|';

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub question_type: String,
    pub subject: String,
    pub content: String,

    /// Pipe-delimited list of options (e.g. "Paris|Rome|Oslo").
    pub choices: String,

    /// Text of the correct choice; must appear in `choices`.
    pub answer: String,

    pub points: i64,
    pub difficulty: String,
}

/// A question ready to be sent as a quiz poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnQuestion {
    pub id: i64,
    pub subject: String,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_option: usize,
    pub points: i64,
    pub difficulty: String,
}

impl QuestionRecord {
    /// Splits the stored choices and locates the correct one.
    ///
    /// Returns `None` when the answer text is not among the choices.
    pub fn into_drawn(self) -> Option<DrawnQuestion> {
        let choices: Vec<String> = self
            .choices
            .split(CHOICE_SEPARATOR)
            .map(str::to_string)
            .collect();
        let correct_option = choices.iter().position(|c| *c == self.answer)?;

        Some(DrawnQuestion {
            id: self.id,
            subject: self.subject,
            text: self.content,
            choices,
            correct_option,
            points: self.points,
            difficulty: self.difficulty,
        })
    }
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_answer_in_choices))]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 300))]
    pub content: String,
    #[validate(custom(function = validate_choices))]
    pub choices: Vec<String>,
    #[validate(length(min = 1, max = 100))]
    pub answer: String,
    #[validate(range(min = 1, max = 100))]
    pub points: i64,
    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,
}

fn validate_choices(choices: &[String]) -> Result<(), validator::ValidationError> {
    // Quiz polls accept between 2 and 10 options.
    if choices.len() < 2 || choices.len() > 10 {
        return Err(validator::ValidationError::new("choices_count_out_of_range"));
    }
    for choice in choices {
        if choice.is_empty() || choice.len() > 100 {
            return Err(validator::ValidationError::new("choice_length_out_of_range"));
        }
        if choice.contains(CHOICE_SEPARATOR) {
            return Err(validator::ValidationError::new("choice_contains_separator"));
        }
    }
    Ok(())
}

fn validate_answer_in_choices(
    req: &CreateQuestionRequest,
) -> Result<(), validator::ValidationError> {
    if !req.choices.contains(&req.answer) {
        return Err(validator::ValidationError::new("answer_not_in_choices"));
    }
    Ok(())
}
