//! Member-name resolution.
//!
//! Decides whether a question is about one specific member, and if so which
//! corpus positions belong to that member. Rules, first match wins:
//!
//! 1. **Full name.** Every position whose lowercased member name is a
//!    substring of the lowercased question. Any hit is confident.
//! 2. **Name token.** Name tokens (word tokens of length ≥ 3) are matched
//!    against the question's token set. Matches are grouped by exact member
//!    name. One group is confident; zero or several groups fall back to the
//!    whole corpus, unconfident.
//!
//! Rule 2 never picks one member over another when a token such as a shared
//! first name points at several of them.

use std::collections::HashMap;

use serde::Serialize;

use crate::text::{word_tokens, Vocabulary};

/// Minimum length of a name token used for token matching.
pub const MIN_NAME_TOKEN_LEN: usize = 3;

/// Candidate positions for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restriction {
    /// Corpus positions eligible to be the answer, ascending.
    pub candidates: Vec<usize>,
    /// True when exactly one member was identified.
    pub confident: bool,
}

impl Restriction {
    /// Every position of a corpus of `len` documents, unconfident.
    pub fn unrestricted(len: usize) -> Self {
        Self {
            candidates: (0..len).collect(),
            confident: false,
        }
    }

    /// True when the candidates span the whole corpus of `len` documents.
    pub fn covers(&self, len: usize) -> bool {
        self.candidates.len() >= len
    }
}

/// Resolve the member restriction for `question` over the per-document
/// member names.
pub fn resolve(question: &str, names: &[Option<String>], vocab: &Vocabulary) -> Restriction {
    let q_lower = question.to_lowercase();

    let full_matches: Vec<usize> = names
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| match name {
            Some(n) if !n.is_empty() && q_lower.contains(&n.to_lowercase()) => Some(idx),
            _ => None,
        })
        .collect();

    if !full_matches.is_empty() {
        return Restriction {
            candidates: full_matches,
            confident: true,
        };
    }

    let q_tokens = vocab.tokenize(question);
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();

    for (idx, name) in names.iter().enumerate() {
        let Some(name) = name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let hit = word_tokens(name)
            .filter(|t| t.chars().count() >= MIN_NAME_TOKEN_LEN)
            .any(|t| q_tokens.contains(&t));
        if hit {
            by_name.entry(name).or_default().push(idx);
        }
    }

    if by_name.len() == 1 {
        if let Some((_, positions)) = by_name.into_iter().next() {
            return Restriction {
                candidates: positions,
                confident: true,
            };
        }
    } else if by_name.len() > 1 {
        tracing::debug!(
            members = by_name.len(),
            "name token is shared by several members; not restricting"
        );
    }

    Restriction::unrestricted(names.len())
}
