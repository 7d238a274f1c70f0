//! Startup pipeline: message source → flatten → index.

use anyhow::Result;
use member_qa_core::QaEngine;
use std::sync::Arc;

use crate::config::Config;
use crate::extract::build_documents;
use crate::sources::{create_source, load_messages, MessageSource};

/// Fetch messages from the configured source and flatten them.
///
/// Fetch failures are logged and produce an empty list; only an invalid
/// source configuration is an error.
pub async fn fetch_documents(config: &Config) -> Result<Vec<String>> {
    let source = create_source(&config.source)?;
    Ok(documents_from(source.as_ref()).await)
}

/// Fetch and flatten from an arbitrary source.
pub async fn documents_from(source: &dyn MessageSource) -> Vec<String> {
    let messages = load_messages(source).await;
    let docs = build_documents(&messages);
    tracing::info!("built {} documents for QA index", docs.len());
    docs
}

/// Build a ready-to-serve engine from the configured source.
pub async fn build_engine(config: &Config) -> Result<Arc<QaEngine>> {
    let source = create_source(&config.source)?;
    Ok(build_engine_from(config, source.as_ref()).await)
}

/// Build an engine from `source`, using the thresholds and word lists in
/// `config`.
pub async fn build_engine_from(config: &Config, source: &dyn MessageSource) -> Arc<QaEngine> {
    let engine = Arc::new(QaEngine::new(config.answer_params(), config.vocabulary()));
    engine.build(documents_from(source).await);
    if engine.is_ready() {
        tracing::info!("startup complete: QA index ready");
    }
    engine
}
