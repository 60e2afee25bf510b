use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Grading outcome for a single question of a submission.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct AnswerEvaluation {
    pub question_id: String,
    pub user_answer: String,
    /// Empty when the question id is unknown to the bank; such items are
    /// scored as incorrect rather than failing the whole batch.
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregate result over one graded submission.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Evaluation {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    pub score_percentage: f64,
    pub results: Vec<AnswerEvaluation>,
}
