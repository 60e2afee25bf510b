use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A question as handed out to clients. The correct option is never part of
/// this type, so it can be serialized to a participant as-is.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

/// The grading side of a question, one-to-one with [`Question`] by id.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct AnswerKey {
    pub question_id: String,
    /// Single-letter option key, stored lower-case.
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
