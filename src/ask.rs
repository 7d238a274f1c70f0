//! CLI entry points for `mqa ask` and `mqa documents`.

use anyhow::Result;
use member_qa_core::Outcome;

use crate::config::Config;
use crate::ingest::{build_engine, fetch_documents};

/// Build the engine from the configured source, answer `question`, and
/// print the answer to stdout.
///
/// With `explain`, the decision (outcome, position, score, threshold) is
/// printed below the answer.
pub async fn run_ask(config: &Config, question: &str, explain: bool) -> Result<()> {
    let engine = build_engine(config).await?;
    let decision = engine.decide(question);

    println!("{}", decision.answer);

    if explain {
        println!();
        println!("    outcome: {}", outcome_label(&decision.outcome));
        if let Some((position, score, confident)) = best_candidate(&decision.outcome) {
            println!(
                "    best: #{}  score={:.4}  required={:.2}  confident={}",
                position,
                score,
                engine.params().required(confident),
                confident
            );
        }
        println!("    documents: {}", engine.document_count());
    }

    Ok(())
}

/// Print the flattened documents the engine would be built from.
pub async fn run_documents(config: &Config, limit: Option<usize>) -> Result<()> {
    let docs = fetch_documents(config).await?;

    if docs.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    let shown = limit.unwrap_or(docs.len()).min(docs.len());
    for (i, doc) in docs.iter().take(shown).enumerate() {
        println!("{}. {}", i + 1, doc);
    }
    if shown < docs.len() {
        println!("... {} more", docs.len() - shown);
    }

    Ok(())
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::NotBuilt => "not_built",
        Outcome::EmptyQuestion => "empty_question",
        Outcome::BelowThreshold { .. } => "below_threshold",
        Outcome::TopicInconsistent { .. } => "topic_inconsistent",
        Outcome::Answered { .. } => "answered",
        Outcome::RawFallback { .. } => "raw_fallback",
    }
}

/// Position, score, and confidence of the selected document, if any.
fn best_candidate(outcome: &Outcome) -> Option<(usize, f64, bool)> {
    match *outcome {
        Outcome::NotBuilt | Outcome::EmptyQuestion => None,
        Outcome::BelowThreshold {
            position,
            score,
            confident,
            ..
        }
        | Outcome::TopicInconsistent {
            position,
            score,
            confident,
        }
        | Outcome::Answered {
            position,
            score,
            confident,
        }
        | Outcome::RawFallback {
            position,
            score,
            confident,
        } => Some((position, score, confident)),
    }
}
