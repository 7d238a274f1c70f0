//! TOML configuration.
//!
//! Every section is optional; [`Config::default`] fetches messages from the
//! public messages API, uses the built-in word lists, and serves on
//! `127.0.0.1:8000`.

use anyhow::{Context, Result};
use member_qa_core::text::{DEFAULT_STOPWORDS, DEFAULT_TOPIC_GROUPS};
use member_qa_core::{AnswerParams, Vocabulary};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub answer: AnswerConfig,
    #[serde(default)]
    pub topics: TopicsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// `"http"` or `"file"`.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// JSON file read when `kind = "file"`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            base_url: default_base_url(),
            path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_kind() -> String {
    "http".to_string()
}
fn default_base_url() -> String {
    "http://november7-730026606190.europe-west1.run.app".to_string()
}
fn default_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnswerConfig {
    #[serde(default = "default_confident_threshold")]
    pub confident_threshold: f64,
    #[serde(default = "default_unrestricted_threshold")]
    pub unrestricted_threshold: f64,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            confident_threshold: default_confident_threshold(),
            unrestricted_threshold: default_unrestricted_threshold(),
        }
    }
}

fn default_confident_threshold() -> f64 {
    0.05
}
fn default_unrestricted_threshold() -> f64 {
    0.15
}

/// Overrides for the overlap stopwords and synonym groups.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TopicsConfig {
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,
    #[serde(default)]
    pub groups: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn answer_params(&self) -> AnswerParams {
        AnswerParams {
            confident_threshold: self.answer.confident_threshold,
            unrestricted_threshold: self.answer.unrestricted_threshold,
        }
    }

    /// Word lists for the resolver and topic filter, falling back to the
    /// built-in defaults for anything not configured.
    pub fn vocabulary(&self) -> Vocabulary {
        let stopwords: Vec<String> = match &self.topics.stopwords {
            Some(list) => list.clone(),
            None => DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        };
        let groups: Vec<Vec<String>> = match &self.topics.groups {
            Some(groups) => groups.clone(),
            None => DEFAULT_TOPIC_GROUPS
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
        };
        Vocabulary::new(stopwords, groups)
    }
}

/// Parse and validate a configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Read, parse, and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

fn validate(config: &Config) -> Result<()> {
    // Validate source
    match config.source.kind.as_str() {
        "http" => {
            if config.source.base_url.trim().is_empty() {
                anyhow::bail!("source.base_url must not be empty when kind is 'http'");
            }
        }
        "file" => {
            if config.source.path.is_none() {
                anyhow::bail!("source.path must be set when kind is 'file'");
            }
        }
        other => anyhow::bail!(
            "Unknown source kind: '{}'. Must be http or file.",
            other
        ),
    }

    if config.source.timeout_secs == 0 {
        anyhow::bail!("source.timeout_secs must be > 0");
    }

    // Validate answer thresholds
    for (name, value) in [
        ("answer.confident_threshold", config.answer.confident_threshold),
        (
            "answer.unrestricted_threshold",
            config.answer.unrestricted_threshold,
        ),
    ] {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{} must be in [0.0, 1.0]", name);
        }
    }

    // Validate topics
    if let Some(groups) = &config.topics.groups {
        if groups.iter().any(|g| g.is_empty()) {
            anyhow::bail!("topics.groups must not contain an empty group");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.source.kind, "http");
        assert_eq!(config.source.timeout_secs, 20);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.answer_params(), AnswerParams::default());
        assert!(config.vocabulary().stopwords.contains("timestamp"));
        assert_eq!(config.vocabulary().topic_groups.len(), 3);
    }

    #[test]
    fn test_file_source_requires_path() {
        let err = parse_config("[source]\nkind = \"file\"\n").unwrap_err();
        assert!(err.to_string().contains("source.path"));

        let config = parse_config("[source]\nkind = \"file\"\npath = \"m.json\"\n").unwrap();
        assert_eq!(config.source.path, Some(PathBuf::from("m.json")));
    }

    #[test]
    fn test_unknown_source_kind() {
        let err = parse_config("[source]\nkind = \"ftp\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown source kind"));
    }

    #[test]
    fn test_threshold_range() {
        let err = parse_config("[answer]\nconfident_threshold = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("answer.confident_threshold"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_config("[source]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_topic_overrides() {
        let config = parse_config(
            "[topics]\nstopwords = [\"Foo\"]\ngroups = [[\"boat\", \"yacht\"]]\n",
        )
        .unwrap();
        let vocab = config.vocabulary();
        assert!(vocab.stopwords.contains("foo"));
        assert!(!vocab.stopwords.contains("the"));
        assert_eq!(vocab.topic_groups.len(), 1);
    }

    #[test]
    fn test_empty_topic_group_rejected() {
        assert!(parse_config("[topics]\ngroups = [[]]\n").is_err());
    }
}
