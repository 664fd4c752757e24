//! # Barangay FAQ CLI (`faq`)
//!
//! ## Usage
//!
//! ```bash
//! faq --config ./config/faq.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `faq ask "<message>"` | Print the chatbot reply for a message |
//! | `faq match "<query>"` | Single lookup at a given threshold |
//! | `faq categories` | List FAQ categories |
//! | `faq check` | Validate that the corpus loads |
//! | `faq serve` | Start the HTTP server |

mod ask;
mod catalog;
mod config;
mod corpus;
mod server;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "./config/faq.toml";

/// Barangay Legal Aid FAQ chatbot.
///
/// Matches free-text questions against a categorized FAQ corpus and
/// returns the best answer.
#[derive(Parser)]
#[command(
    name = "faq",
    about = "Barangay Legal Aid FAQ chatbot",
    version,
    long_about = "Matches chat messages against a categorized FAQ corpus using character \
    similarity and keyword overlap, with a two-tier acceptance threshold and a fixed \
    fallback reply."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/faq.toml` when it exists; otherwise the corpus
    /// is read from `./data/faq.json`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chatbot reply for a message.
    ///
    /// Tries the 0.5 threshold, then 0.3, then falls back to the default
    /// message. Never fails.
    Ask {
        /// The user's chat message.
        message: String,
    },

    /// Look up the best answer at a single threshold.
    Match {
        /// The query text.
        query: String,

        /// Acceptance threshold in [0.0, 1.0].
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,

        /// Print the winning candidate's score breakdown.
        #[arg(long)]
        explain: bool,
    },

    /// List FAQ categories and their question counts.
    Categories,

    /// Load the corpus and report whether it is usable.
    Check,

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "barangay_faq=debug,barangay_faq_core=debug,tower_http=debug"
    } else {
        "barangay_faq=info,barangay_faq_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<config::Config> {
    if let Some(path) = explicit {
        return config::load_config(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG);
    if default_path.exists() {
        config::load_config(default_path)
    } else {
        tracing::debug!("no config file at {}; using defaults", DEFAULT_CONFIG);
        Ok(config::Config::minimal())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask { message } => {
            ask::run_ask(&cfg, &message)?;
        }
        Commands::Match {
            query,
            threshold,
            explain,
        } => {
            ask::run_match(&cfg, &query, threshold, explain)?;
        }
        Commands::Categories => {
            catalog::list_categories(&cfg)?;
        }
        Commands::Check => {
            catalog::run_check(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
