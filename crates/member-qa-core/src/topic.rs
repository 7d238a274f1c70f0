//! Topic consistency between a question and a candidate document.
//!
//! A high similarity score can come from nothing more than the member's own
//! name. The filter strips the member's name tokens from both sides and then
//! requires either a shared content word or a shared synonym group.

use crate::text::{word_tokens, Vocabulary};

/// True when `question` and `document` share content beyond `member`'s name.
pub fn is_consistent(
    vocab: &Vocabulary,
    question: &str,
    document: &str,
    member: Option<&str>,
) -> bool {
    let mut q_tokens = vocab.tokenize(question);
    let mut d_tokens = vocab.tokenize(document);

    if let Some(member) = member {
        for part in word_tokens(member) {
            q_tokens.remove(&part);
            d_tokens.remove(&part);
        }
    }

    if !q_tokens.is_disjoint(&d_tokens) {
        return true;
    }

    vocab
        .topic_groups
        .iter()
        .any(|group| !group.is_disjoint(&q_tokens) && !group.is_disjoint(&d_tokens))
}
