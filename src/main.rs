//! # Member QA CLI (`mqa`)
//!
//! ## Usage
//!
//! ```bash
//! mqa --config ./config/mqa.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mqa serve` | Fetch messages, build the index, start the HTTP server |
//! | `mqa ask "<question>"` | Answer one question and exit |
//! | `mqa documents` | Print the flattened documents |
//!
//! ## Examples
//!
//! ```bash
//! mqa ask "When is Layla planning her trip to London?"
//! mqa ask "How many cars does Vikram Desai have?" --explain
//! mqa serve --config ./config/mqa.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use member_qa::{ask, config, ingest, logging, server};

/// Member QA: answers questions from member messages by retrieval.
#[derive(Parser)]
#[command(
    name = "mqa",
    about = "Member QA: answer questions from member messages",
    version,
    long_about = "Member QA fetches member messages, indexes them with TF-IDF, and answers \
    natural-language questions with the single most relevant message, or says that the \
    information is not available."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the file does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/mqa.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Fetches messages once at startup, builds the index, and serves
    /// `/ask` and `/health` on `[server].bind`.
    Serve {
        /// Override `[server].bind` (e.g. `0.0.0.0:8080`).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Answer a single question.
    Ask {
        /// The question text.
        question: String,

        /// Also print how the answer was decided.
        #[arg(long)]
        explain: bool,
    },

    /// Print the flattened documents the index is built from.
    Documents {
        /// Maximum number of documents to print.
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::default()
    };

    logging::init_logging(&cfg.logging)?;
    if !cli.config.exists() {
        tracing::warn!(
            "config file {} not found; using defaults",
            cli.config.display()
        );
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            let engine = ingest::build_engine(&cfg).await?;
            server::run_server(&cfg, engine).await?;
        }
        Commands::Ask { question, explain } => {
            ask::run_ask(&cfg, &question, explain).await?;
        }
        Commands::Documents { limit } => {
            ask::run_documents(&cfg, limit).await?;
        }
    }

    Ok(())
}
