mod commands;
mod config;
mod error;
mod metrics;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::{
    config::{CliConfig, LogFormat, OutputFormat},
    metrics::ParseMetrics,
};

/// Detect, parse and convert geographic coordinates
#[derive(Parser, Debug)]
#[command(name = "coords", version)]
struct Cli {
    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Configuration file (replaces the default search paths)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse coordinate text in any supported notation
    ///
    /// Texts may start with '-', so global flags go before the subcommand.
    Parse {
        #[arg(value_name = "TEXT", required = true, allow_hyphen_values = true)]
        texts: Vec<String>,
    },

    /// Print the notation each text looks like
    Detect {
        #[arg(value_name = "TEXT", required = true, allow_hyphen_values = true)]
        texts: Vec<String>,
    },

    /// Convert a latitude/longitude pair to an MGRS reference
    Mgrs {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Digits per axis, 1 (10 km) to 5 (1 m)
        #[arg(long, short, value_name = "N", allow_negative_numbers = true)]
        precision: Option<i32>,
    },

    /// Parse one coordinate per stdin line
    Batch,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Phase 1: Basic tracing so we can log during config loading
    // Uses set_default (thread-local) so it can be replaced by Phase 2's global subscriber
    let basic_tracing = init_tracing_basic();

    let config = CliConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    config.validate()
        .context("Configuration validation failed")?;

    // Phase 2: Re-initialize tracing with config (format, level)
    drop(basic_tracing);
    init_tracing_from_config(&config);

    debug!(?config, "Configuration loaded");

    let output = cli.output.unwrap_or(config.output);
    let metrics = ParseMetrics::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = match cli.command {
        Command::Parse { texts } => commands::parse_all(&texts, output, &metrics, &mut out)? == 0,
        Command::Detect { texts } => {
            commands::detect_all(&texts, output, &mut out)?;
            true
        }
        Command::Mgrs { latitude, longitude, precision } => {
            let precision = precision.unwrap_or_else(|| i32::from(config.mgrs_precision));
            commands::mgrs(latitude, longitude, precision, output, &mut out)?
        }
        Command::Batch => {
            info!("Reading coordinates from stdin");
            let stdin = io::stdin();
            commands::batch(stdin.lock(), output, &metrics, &mut out)? == 0
        }
    };

    out.flush().context("Failed to flush stdout")?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Phase 1: Basic tracing init so we can log during config loading.
/// Uses RUST_LOG env var or a sensible default.
fn init_tracing_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coords=info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: Install the global subscriber from configuration.
/// Logs always go to stderr; stdout carries results only.
fn init_tracing_from_config(config: &CliConfig) {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    // Prefer RUST_LOG env var, fall back to config level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_accepts_hyphenated_text() {
        let cli = Cli::try_parse_from(["coords", "parse", "-33.8688, 151.2093"]).unwrap();
        match cli.command {
            Command::Parse { texts } => assert_eq!(texts, vec!["-33.8688, 151.2093"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_mgrs_negative_coordinates() {
        let cli = Cli::try_parse_from(["coords", "mgrs", "-33.8688", "151.2093", "--precision", "3"]).unwrap();
        match cli.command {
            Command::Mgrs { latitude, longitude, precision } => {
                assert_eq!(latitude, -33.8688);
                assert_eq!(longitude, 151.2093);
                assert_eq!(precision, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["coords", "--output", "json", "detect", "1, 2"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_requires_text() {
        assert!(Cli::try_parse_from(["coords", "parse"]).is_err());
    }
}
