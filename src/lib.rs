//! # Member QA
//!
//! Closed-domain question answering over short member messages.
//!
//! A question is answered with the single most relevant message, restated
//! as `Member: ... | Timestamp: ... | Message: ...`, or with a fixed
//! refusal when the messages do not clearly support an answer. Nothing is
//! generated.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  Messages   │──▶│  Flatten    │──▶│  QaEngine    │
//! │ HTTP / file │   │ (extract)   │   │ TF-IDF+rules │
//! └─────────────┘   └─────────────┘   └──────┬───────┘
//!                                            │
//!                        ┌───────────────────┤
//!                        ▼                   ▼
//!                   ┌──────────┐       ┌──────────┐
//!                   │   CLI    │       │   HTTP   │
//!                   │  (mqa)   │       │  /ask    │
//!                   └──────────┘       └──────────┘
//! ```
//!
//! The decision logic lives in the `member-qa-core` crate; this crate
//! supplies configuration, message sources, flattening, and transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`models`] | Raw message and request/response types |
//! | [`sources`] | `MessageSource` trait, HTTP and file sources |
//! | [`extract`] | Raw message → labeled document |
//! | [`ingest`] | Source → documents → engine |
//! | [`server`] | Axum HTTP server with CORS |
//! | [`ask`] | CLI commands |
//! | [`logging`] | `tracing` subscriber setup |

pub mod ask;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod server;
pub mod sources;

pub use member_qa_core::{AnswerParams, Decision, Outcome, QaEngine};
pub use sources::MessageSource;
