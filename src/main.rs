use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cityscope_core::{AppError, Config};
use cityscope_enrich::{EnrichError, Orchestrator, Phase, Sources};
use cityscope_places::PlacesClient;
use tokio::runtime::Handle;

mod render;

/// Look up a place and see its weather and what is around it.
#[derive(Debug, Parser)]
#[command(name = "cityscope", version, about)]
struct Cli {
    /// Place to look up, e.g. "Berlin" or "Buenos Aires"
    query: Vec<String>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log request detail to stderr
    #[arg(short, long)]
    verbose: bool,

    /// List matching city names instead of looking the place up
    #[arg(long)]
    suggest: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        cityscope_core::init_with_level("debug")?;
    } else {
        cityscope_core::init()?;
    }

    let (config, _) =
        Config::load_validated(cli.config.as_deref()).context("Failed to load configuration")?;
    let query = cli.query.join(" ");

    if cli.suggest {
        let client = PlacesClient::from_config(&config.providers)?;
        let suggestions = client
            .autocomplete(&query)
            .await
            .with_context(|| format!("Autocomplete failed for '{}'", query))?;
        print!("{}", render::Suggestions(&suggestions));
        return Ok(ExitCode::SUCCESS);
    }

    let sources = Sources::from_config(&config)?;
    let mut orchestrator = Orchestrator::new(sources, Handle::current());

    orchestrator.submit(&query);
    let failures = orchestrator.settle().await;

    for failure in failures {
        match failure {
            EnrichError::WeatherFailed { location, source } => {
                tracing::debug!("Weather for {} failed: {}", location, source);
                eprintln!("Weather for {}: {}", location, source.user_message());
            }
            EnrichError::CategoryFailed {
                category, source, ..
            } => {
                tracing::debug!("{} search failed: {}", category, source);
                eprintln!("{}: {}", category.label(), source.user_message());
            }
            other => {
                tracing::error!("{}", other);
                eprintln!("{}", AppError::from(other).user_message());
            }
        }
    }

    let snapshot = orchestrator.snapshot();
    print!("{}", render::Report(snapshot));

    if snapshot.phase == Phase::Idle {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
