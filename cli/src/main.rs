//! CLI for the portfolio data layer.
//!
//! Reads configuration from the environment and prints repository listings,
//! project cards and remote content as JSON.

use clap::{Parser, Subcommand};
use portfolio_feed::{build_toc, FeedConfig, FeedError, PinConfiguration, PinError, Portfolio};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Portfolio Feed - Fetch portfolio content and GitHub project data.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pin file overriding the bundled pin list.
    #[arg(long, env = "PORTFOLIO_PINS", global = true)]
    pins: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List repositories, pinned first.
    Repos {
        /// Include card extras (languages, stack, README highlights).
        #[arg(long)]
        extras: bool,
    },

    /// Show one repository's project card.
    Repo {
        /// Repository name.
        name: String,
    },

    /// Print a file from the content repository.
    Content {
        /// Repository-relative path, e.g. `about.mdx`.
        path: String,
    },

    /// List case studies from the index.
    Cases,

    /// Show one case study.
    Case {
        /// Case study slug.
        slug: String,

        /// Print only the table of contents.
        #[arg(long)]
        toc: bool,
    },

    /// Print the table of contents of a content file.
    Toc {
        /// Repository-relative path to an MDX file.
        path: String,
    },
}

/// Errors that abort the CLI before any output.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Pins(#[from] PinError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::from(0)
        }
        Ok(None) => {
            warn!("Requested content is not available");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Output is compact, one line per event, filtered by `RUST_LOG`
/// (defaulting to `info`).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Runs one command. `Ok(None)` means the requested item is absent.
async fn run(args: Args) -> Result<Option<String>, CliError> {
    let pins = match &args.pins {
        Some(path) => PinConfiguration::load(path)?,
        None => PinConfiguration::bundled().clone(),
    };
    let portfolio = Portfolio::new(FeedConfig::from_env().map_err(FeedError::from)?, pins)?;

    let output = match args.command {
        Command::Repos { extras: false } => {
            Some(serde_json::to_value(portfolio.projects().await)?)
        }
        Command::Repos { extras: true } => {
            Some(serde_json::to_value(portfolio.project_cards().await)?)
        }
        Command::Repo { name } => portfolio
            .project_card(&name)
            .await
            .map(serde_json::to_value)
            .transpose()?,
        Command::Content { path } => portfolio
            .content()
            .fetch_text(&path)
            .await
            .map(Value::String),
        Command::Cases => Some(serde_json::to_value(portfolio.case_studies().await)?),
        Command::Case { slug, toc } => match portfolio.case_study(&slug).await {
            Some(case) if toc => Some(serde_json::to_value(case.toc)?),
            Some(case) => Some(serde_json::to_value(case)?),
            None => None,
        },
        Command::Toc { path } => match portfolio.content().fetch_text(&path).await {
            Some(mdx) => Some(serde_json::to_value(build_toc(&mdx))?),
            None => None,
        },
    };

    output
        .map(|value| match value {
            Value::String(text) => Ok(text),
            value => serde_json::to_string_pretty(&value),
        })
        .transpose()
        .map_err(CliError::from)
}
