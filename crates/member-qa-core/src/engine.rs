//! Answer decision pipeline.
//!
//! # Pipeline
//!
//! 1. No snapshot → [`NO_DATA_MESSAGE`].
//! 2. Blank question → [`EMPTY_QUESTION_MESSAGE`].
//! 3. Resolve the member restriction ([`crate::resolver`]).
//! 4. Score every document ([`crate::index`]); zero scores outside the
//!    restriction.
//! 5. Pick the highest score, lowest position on ties.
//! 6. Require the confident or the unrestricted threshold
//!    ([`AnswerParams`]).
//! 7. Require topic consistency ([`crate::topic`]).
//! 8. Format the winning document's segments, or return it verbatim when it
//!    has none.
//!
//! Every refusal is one of three fixed sentences; [`QaEngine::answer`]
//! never fails.
//!
//! # Snapshots
//!
//! A [`Snapshot`] holds the documents, their parsed segments, member names,
//! and the fitted index. It is immutable. [`QaEngine::build`] constructs a
//! complete new snapshot before swapping it in, so readers always see a
//! consistent corpus and index.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use serde::Serialize;

use crate::document::{extract_member_name, MessageFields};
use crate::index::TfIdfIndex;
use crate::resolver::{resolve, Restriction};
use crate::text::Vocabulary;
use crate::topic::is_consistent;

/// Returned when no corpus has been built.
pub const NO_DATA_MESSAGE: &str =
    "I don't have any member messages to answer from yet. Please try again later.";
/// Returned for a blank question.
pub const EMPTY_QUESTION_MESSAGE: &str = "Question has no meaningful content.";
/// Returned whenever the corpus does not clearly support an answer.
pub const NOT_AVAILABLE_MESSAGE: &str = "The information is not available in the member messages.";

/// Minimum scores, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerParams {
    /// Required score when the question was tied to exactly one member.
    pub confident_threshold: f64,
    /// Required score when no member restriction applied.
    pub unrestricted_threshold: f64,
}

impl Default for AnswerParams {
    fn default() -> Self {
        Self {
            confident_threshold: 0.05,
            unrestricted_threshold: 0.15,
        }
    }
}

impl AnswerParams {
    /// Threshold for a restriction of the given confidence.
    pub fn required(&self, confident: bool) -> f64 {
        if confident {
            self.confident_threshold
        } else {
            self.unrestricted_threshold
        }
    }

    /// True when `score` is positive and at least the required threshold.
    pub fn accepts(&self, score: f64, confident: bool) -> bool {
        score > 0.0 && score >= self.required(confident)
    }
}

/// How a question was decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// No corpus has been built, or the last build was empty.
    NotBuilt,
    /// The trimmed question was empty.
    EmptyQuestion,
    /// The best score did not reach the threshold for the restriction.
    BelowThreshold {
        position: usize,
        score: f64,
        required: f64,
        confident: bool,
    },
    /// The best document shares no topic with the question.
    TopicInconsistent {
        position: usize,
        score: f64,
        confident: bool,
    },
    /// The best document was formatted from its labeled segments.
    Answered {
        position: usize,
        score: f64,
        confident: bool,
    },
    /// The winning document had no parsable segment and is returned as is.
    RawFallback {
        position: usize,
        score: f64,
        confident: bool,
    },
}

/// The answer text together with the reason it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub answer: String,
}

impl Decision {
    fn new(outcome: Outcome, answer: impl Into<String>) -> Self {
        Self {
            outcome,
            answer: answer.into(),
        }
    }
}

/// An immutable, fully built corpus and index.
#[derive(Debug)]
pub struct Snapshot {
    documents: Vec<String>,
    names: Vec<Option<String>>,
    fields: Vec<MessageFields>,
    index: TfIdfIndex,
}

impl Snapshot {
    /// Parse and index `documents`. Fails on an empty list.
    pub fn new(documents: Vec<String>) -> Result<Self> {
        let index = TfIdfIndex::fit(&documents)?;
        let names = documents.iter().map(|d| extract_member_name(d)).collect();
        let fields = documents.iter().map(|d| MessageFields::parse(d)).collect();

        Ok(Self {
            documents,
            names,
            fields,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Member name per document, aligned with [`Snapshot::documents`].
    pub fn member_names(&self) -> &[Option<String>] {
        &self.names
    }

    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    /// Run the full pipeline for `question` against this snapshot.
    pub fn decide(&self, question: &str, params: &AnswerParams, vocab: &Vocabulary) -> Decision {
        let question = question.trim();
        if question.is_empty() {
            return Decision::new(Outcome::EmptyQuestion, EMPTY_QUESTION_MESSAGE);
        }

        let restriction = resolve(question, &self.names, vocab);
        let scores = self.restricted_scores(question, &restriction);

        let Some((position, score)) = best_match(&scores) else {
            return Decision::new(Outcome::NotBuilt, NO_DATA_MESSAGE);
        };
        let confident = restriction.confident;

        tracing::info!(
            score,
            position,
            confident,
            candidates = restriction.candidates.len(),
            "best similarity score for query"
        );

        if !params.accepts(score, confident) {
            let required = params.required(confident);
            return Decision::new(
                Outcome::BelowThreshold {
                    position,
                    score,
                    required,
                    confident,
                },
                NOT_AVAILABLE_MESSAGE,
            );
        }

        let document = &self.documents[position];
        let fields = &self.fields[position];

        if !is_consistent(vocab, question, document, fields.member.as_deref()) {
            tracing::debug!(position, "top candidate is not on topic");
            return Decision::new(
                Outcome::TopicInconsistent {
                    position,
                    score,
                    confident,
                },
                NOT_AVAILABLE_MESSAGE,
            );
        }

        match fields.format_answer() {
            Some(answer) => Decision::new(
                Outcome::Answered {
                    position,
                    score,
                    confident,
                },
                answer,
            ),
            None => Decision::new(
                Outcome::RawFallback {
                    position,
                    score,
                    confident,
                },
                document.clone(),
            ),
        }
    }

    fn restricted_scores(&self, question: &str, restriction: &Restriction) -> Vec<f64> {
        let mut scores = self.index.score(question);
        if !restriction.covers(scores.len()) {
            let mut allowed = vec![false; scores.len()];
            for &i in &restriction.candidates {
                if let Some(slot) = allowed.get_mut(i) {
                    *slot = true;
                }
            }
            for (score, keep) in scores.iter_mut().zip(allowed) {
                if !keep {
                    *score = 0.0;
                }
            }
        }
        scores
    }
}

/// Position and value of the highest score; the first position wins ties.
pub fn best_match(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best
}

/// Question answering over a replaceable [`Snapshot`].
///
/// Cheap to share behind an `Arc`; `answer` takes a read lock only long
/// enough to clone the snapshot pointer.
#[derive(Debug)]
pub struct QaEngine {
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    params: AnswerParams,
    vocab: Vocabulary,
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::new(AnswerParams::default(), Vocabulary::default())
    }
}

impl QaEngine {
    /// An engine with no corpus; every answer is [`NO_DATA_MESSAGE`] until
    /// [`build`](QaEngine::build) succeeds.
    pub fn new(params: AnswerParams, vocab: Vocabulary) -> Self {
        Self {
            snapshot: RwLock::new(None),
            params,
            vocab,
        }
    }

    /// Replace the corpus with `documents`.
    ///
    /// An empty list leaves the engine without a corpus.
    pub fn build(&self, documents: Vec<String>) {
        let next = if documents.is_empty() {
            tracing::warn!("build called with no documents; engine is not ready");
            None
        } else {
            tracing::info!("building TF-IDF index for {} documents", documents.len());
            match Snapshot::new(documents) {
                Ok(snapshot) => {
                    tracing::info!(
                        documents = snapshot.len(),
                        features = snapshot.index().feature_count(),
                        "index built"
                    );
                    Some(Arc::new(snapshot))
                }
                Err(e) => {
                    tracing::warn!("index build failed: {:#}", e);
                    None
                }
            }
        };

        let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *slot = next;
    }

    /// The current snapshot, if one is built.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True once a non-empty corpus has been built.
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Number of indexed documents (0 when not ready).
    pub fn document_count(&self) -> usize {
        self.snapshot().map(|s| s.len()).unwrap_or(0)
    }

    pub fn params(&self) -> &AnswerParams {
        &self.params
    }

    /// Answer `question` and report how the answer was reached.
    pub fn decide(&self, question: &str) -> Decision {
        match self.snapshot() {
            Some(snapshot) => snapshot.decide(question, &self.params, &self.vocab),
            None => Decision::new(Outcome::NotBuilt, NO_DATA_MESSAGE),
        }
    }

    /// Answer `question`. Total: every failure maps to a fixed sentence.
    pub fn answer(&self, question: &str) -> String {
        self.decide(question).answer
    }
}
