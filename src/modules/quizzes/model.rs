use serde::{Deserialize, Serialize};
use trivia_core::serde::deserialize_int_or_str;
use trivia_models::{CategoryId, Question, QuestionId};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuizCategory {
    /// Category to draw from; `0` draws from every category
    #[serde(deserialize_with = "deserialize_int_or_str")]
    #[schema(value_type = i32, example = 1)]
    pub id: CategoryId,
    /// Display name sent by clients; ignored
    #[serde(default, rename = "type")]
    #[schema(example = "Science")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuizRequest {
    pub quiz_category: QuizCategory,
    /// Ids already asked in this round
    #[serde(default)]
    #[schema(value_type = Vec<i32>)]
    pub previous_questions: Vec<QuestionId>,
}

/// `question` is `null` once the round has nothing left to ask.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}
