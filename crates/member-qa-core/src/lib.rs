//! # Member QA Core
//!
//! Shared logic for Member QA: document segment parsing, tokenization,
//! the TF-IDF vector index, member-name resolution, the topic consistency
//! filter, and the answer decision pipeline.
//!
//! This crate performs no network or filesystem I/O. Raw messages are
//! fetched and flattened into documents by the `member-qa` app crate, which
//! then hands the documents to [`engine::QaEngine::build`].

pub mod document;
pub mod engine;
pub mod index;
pub mod resolver;
pub mod text;
pub mod topic;

pub use engine::{AnswerParams, Decision, Outcome, QaEngine, Snapshot};
pub use text::Vocabulary;
