mod cli;
mod input;
mod metrics;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callmatch_core::{load_config, load_config_from_env, validate_config, BatchMatcher, Config};

use cli::{Args, LogFormat};

fn main() {
    let args = Args::parse();
    init_logging(args.log_format);

    if let Err(e) = run(args) {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the result JSON, so logs go to stderr
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn load(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            info!("No config file given, using defaults and environment");
            load_config_from_env().context("Failed to load config from environment")?
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load(&args)?;

    let entries = input::read_entries(&args.entries)?;
    let recordings = input::read_recordings(&args.recordings)?;
    info!(
        entries = entries.len(),
        recordings = recordings.len(),
        "Inputs loaded"
    );

    let matcher = BatchMatcher::new(config.matching)
        .context("Invalid matching configuration")?
        .with_batch_config(config.batch);
    let result = matcher.match_all(&entries, &recordings, args.user.as_deref());

    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Result written to {:?}", path);
        }
        None => println!("{}", json),
    }

    if args.metrics {
        eprint!("{}", metrics::encode_metrics()?);
    }

    Ok(())
}
