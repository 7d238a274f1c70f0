//! Labeled document segments.
//!
//! A document is one flattened message, a single line of `" | "`-separated
//! labeled segments:
//!
//! ```text
//! User: Alice | Timestamp: 2024-01-01 | Message: I booked dinner | id: 7
//! ```
//!
//! The segment format is shared with the flattener in the app crate and must
//! stay byte-compatible with it. Documents are parsed once, at build time,
//! into [`MessageFields`].

use serde::Serialize;

/// Segment label carrying the member name.
pub const USER_LABEL: &str = "User:";
/// Segment label carrying the message timestamp.
pub const TIMESTAMP_LABEL: &str = "Timestamp:";
/// Segment label carrying the message body.
pub const MESSAGE_LABEL: &str = "Message:";

/// The answer-relevant segments of a document.
///
/// Identifier segments (`id:`, `user_id:`, `member_id:`) are indexed but not
/// parsed; they never appear in a formatted answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageFields {
    pub member: Option<String>,
    pub timestamp: Option<String>,
    pub message: Option<String>,
}

impl MessageFields {
    /// Parse every labeled segment of `doc`.
    ///
    /// Segments are split on `|` and trimmed. A later segment with the same
    /// label overrides an earlier one; empty values count as absent.
    pub fn parse(doc: &str) -> Self {
        let mut fields = MessageFields::default();

        for part in doc.split('|').map(str::trim) {
            if let Some(v) = part.strip_prefix(USER_LABEL) {
                fields.member = non_empty(v);
            } else if let Some(v) = part.strip_prefix(TIMESTAMP_LABEL) {
                fields.timestamp = non_empty(v);
            } else if let Some(v) = part.strip_prefix(MESSAGE_LABEL) {
                fields.message = non_empty(v);
            }
        }

        fields
    }

    /// True when no answer-relevant segment was found.
    pub fn is_empty(&self) -> bool {
        self.member.is_none() && self.timestamp.is_none() && self.message.is_none()
    }

    /// Render as `Member: <name> | Timestamp: <t> | Message: <m>`, skipping
    /// absent segments. Returns `None` when every segment is absent.
    pub fn format_answer(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(3);
        if let Some(ref m) = self.member {
            parts.push(format!("Member: {}", m));
        }
        if let Some(ref t) = self.timestamp {
            parts.push(format!("Timestamp: {}", t));
        }
        if let Some(ref m) = self.message {
            parts.push(format!("Message: {}", m));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extract the member name used for name resolution.
///
/// Only a document that *starts* with a `User:` segment carries a member
/// name. The name runs up to the first `" |"` delimiter (or end of string)
/// and is trimmed.
pub fn extract_member_name(doc: &str) -> Option<String> {
    let rest = doc.strip_prefix(USER_LABEL)?.trim_start();
    let name = match rest.find(" |") {
        Some(end) => &rest[..end],
        None => rest,
    };
    non_empty(name)
}
