//! Message sources.
//!
//! A [`MessageSource`] produces the raw message records the engine is built
//! from. Two are built in:
//!
//! | Kind | Type | Reads |
//! |------|------|-------|
//! | `http` | [`HttpMessageSource`] | `GET <base_url>/messages/` |
//! | `file` | [`FileMessageSource`] | a local JSON file |
//!
//! Both accept the same payload shapes, normalized by [`normalize_payload`]:
//! a plain list, an object wrapping a list (`{"messages": [...]}`,
//! `{"data": [...]}`, `{"items": [...]}`), or a single object.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::models::RawMessage;

/// A data source that produces raw message records.
///
/// Implement this trait to feed the engine from something other than the
/// built-in HTTP and file sources.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Short identifier used in logs (e.g. `"http"`).
    fn name(&self) -> &str;

    /// Where the messages come from (URL or path), for logs and CLI output.
    fn location(&self) -> String;

    /// Fetch every message record.
    async fn fetch(&self) -> Result<Vec<RawMessage>>;
}

/// Reads messages from the public messages API.
pub struct HttpMessageSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMessageSource {
    /// `base_url` may carry a trailing slash; redirects are followed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/messages/", self.base_url)
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> String {
        self.url()
    }

    async fn fetch(&self) -> Result<Vec<RawMessage>> {
        let url = self.url();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("HTTP error when calling messages API at {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let final_url = resp.url().to_string();
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "messages API returned {} for {}. Body: {:?}",
                status,
                final_url,
                body
            );
        }

        let payload: Value = resp
            .json()
            .await
            .context("Failed to parse JSON from messages API")?;

        Ok(normalize_payload(payload))
    }
}

/// Reads messages from a JSON file on disk.
pub struct FileMessageSource {
    path: PathBuf,
}

impl FileMessageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MessageSource for FileMessageSource {
    fn name(&self) -> &str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawMessage>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read messages file: {}", self.path.display()))?;
        let payload: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse messages file: {}", self.path.display()))?;
        Ok(normalize_payload(payload))
    }
}

/// Create the source described by `[source]`.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn MessageSource>> {
    match config.kind.as_str() {
        "http" => Ok(Box::new(HttpMessageSource::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?)),
        "file" => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("source.path must be set when kind is 'file'"))?;
            Ok(Box::new(FileMessageSource::new(path)))
        }
        other => bail!("Unknown source kind: '{}'. Must be http or file.", other),
    }
}

/// Turn any accepted payload shape into a list of records.
///
/// - A list is used as is.
/// - An object yields its first list-valued field in payload order, or is
///   itself the single record when it holds no list.
/// - Anything else becomes a single record.
///
/// Non-object items are wrapped as `{"_value": item}`.
pub fn normalize_payload(payload: Value) -> Vec<RawMessage> {
    let items: Vec<Value> = match payload {
        Value::Array(items) => items,
        Value::Object(map) => {
            let list = map.values().find_map(|v| match v {
                Value::Array(items) => Some(items.clone()),
                _ => None,
            });
            match list {
                Some(items) => items,
                None => vec![Value::Object(map)],
            }
        }
        other => vec![other],
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("_value".to_string(), other);
                map
            }
        })
        .collect()
}

/// Fetch from `source`, logging and swallowing failures.
///
/// A failed fetch yields an empty list so the service still starts; the
/// engine then answers with the "no data" message.
pub async fn load_messages(source: &dyn MessageSource) -> Vec<RawMessage> {
    tracing::info!("fetching messages from {}", source.location());
    match source.fetch().await {
        Ok(messages) => {
            tracing::info!("fetched {} raw messages", messages.len());
            messages
        }
        Err(e) => {
            tracing::error!(source = source.name(), "failed to fetch messages: {:#}", e);
            Vec::new()
        }
    }
}
