use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Descriptor of a participant session. The `(user_email, session_id)` pair
/// is the external key of the backing record.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Session {
    pub user_email: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// One batch of answered questions, positionally aligned: the i-th answer
/// belongs to the i-th question id. Alignment is checked when a submission is
/// graded, not when it is persisted.
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Submission {
    pub question_ids: Vec<String>,
    pub answers: Vec<String>,
}

/// A session record read back from storage: the two header fields followed by
/// the submissions in append order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_email: String,
    pub session_id: String,
    pub submissions: Vec<Submission>,
}
