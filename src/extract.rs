//! Flatten raw message records into labeled documents.
//!
//! Produces the `" | "`-separated segment format parsed by
//! [`member_qa_core::document`]:
//!
//! ```text
//! User: <name> | Timestamp: <t> | Message: <text> | id: <id> | user_id: <uid> | member_id: <mid>
//! ```

use serde_json::Value;

use crate::models::RawMessage;

/// Keys checked, in order, for the member name. The first truthy value wins.
const NAME_KEYS: &[&str] = &["user_name", "member_name", "name"];
/// Identifier keys appended after the message body.
const ID_KEYS: &[&str] = &["id", "user_id", "member_id"];

/// Flatten every record, preserving order.
pub fn build_documents(messages: &[RawMessage]) -> Vec<String> {
    messages.iter().map(flatten_message).collect()
}

/// Flatten one record into a document.
///
/// A record with none of the known keys renders as its compact JSON text.
pub fn flatten_message(msg: &RawMessage) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(name) = NAME_KEYS
        .iter()
        .filter_map(|k| msg.get(*k))
        .find(|v| is_truthy(v))
    {
        parts.push(format!("User: {}", render(name)));
    }

    if let Some(ts) = msg.get("timestamp") {
        parts.push(format!("Timestamp: {}", render(ts)));
    }

    if let Some(text) = msg.get("message") {
        parts.push(format!("Message: {}", render(text)));
    }

    for key in ID_KEYS {
        if let Some(v) = msg.get(*key) {
            parts.push(format!("{}: {}", key, render(v)));
        }
    }

    if parts.is_empty() {
        Value::Object(msg.clone()).to_string()
    } else {
        parts.join(" | ")
    }
}

/// Strings verbatim, `null` as `None`, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
