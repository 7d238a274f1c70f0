//! Data types shared by the message sources, the flattener, and the server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw message record, as returned by a message source.
///
/// Loosely structured: any of `user_name`, `member_name`, `name`,
/// `timestamp`, `message`, `id`, `user_id`, `member_id` may be present.
pub type RawMessage = Map<String, Value>;

/// Request body for `POST /ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub question: String,
}

/// Query string for `GET /ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionQuery {
    pub question: Option<String>,
}

/// Response body for both `/ask` routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaResponse {
    pub answer: String,
}
