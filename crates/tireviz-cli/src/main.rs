//! tireviz - Tire wear and g-force CLI
//!
//! Drives the tire wear model from recorded or synthetic telemetry and
//! prints session snapshots.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tireviz_model::ModelConfig;
use tireviz_telemetry::Scenario;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::RunArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tireviz")]
#[command(about = "Tire wear heatmap and g-force model driven by racing telemetry")]
#[command(version)]
#[command(long_about = "
tireviz feeds telemetry frames into the tire wear model and reports the
per-zone wear of all four tires together with the g-force indicator.

Frames come from a JSON recording (replay) or a synthetic driving
scenario (simulate). Use --json for machine-readable output.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Model configuration file (.yaml, .yml or .json)
    #[arg(short, long, global = true, env = "TIREVIZ_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded telemetry file
    Replay {
        /// Recording to play back
        file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run a synthetic driving scenario
    Simulate {
        /// Scenario name (straight, braking, left-hander, right-hander, chicane, dropout)
        #[arg(short, long)]
        scenario: Scenario,

        /// Duration in seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,

        /// Frame rate in Hz
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Record a synthetic scenario to a JSON file
    Record {
        /// Scenario name
        #[arg(short, long)]
        scenario: Scenario,

        /// Output recording path
        #[arg(short, long)]
        out: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,

        /// Frame rate in Hz
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },

    /// Print the effective model configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "tireviz={0},tireviz_model={0},tireviz_telemetry={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ModelConfig, CliError> {
    match path {
        Some(path) => Ok(ModelConfig::load(path)?),
        None => Ok(ModelConfig::default()),
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Replay { file, run } => commands::run::replay(file, config, run, cli.json),
        Commands::Simulate {
            scenario,
            seconds,
            fps,
            run,
        } => commands::run::simulate(*scenario, *seconds, *fps, config, run, cli.json),
        Commands::Record {
            scenario,
            out,
            seconds,
            fps,
        } => commands::record::execute(*scenario, *seconds, *fps, out, cli.json),
        Commands::Config => {
            output::print_config(&config, cli.json)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_simulate_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["tireviz", "simulate", "--scenario", "chicane"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Simulate {
                scenario,
                seconds,
                fps,
                run,
            } => {
                assert_eq!(scenario, Scenario::Chicane);
                assert_eq!(seconds, 10.0);
                assert_eq!(fps, 60.0);
                assert!(run.reset_at.is_empty());
                assert_eq!(run.every, None);
                assert!(!run.realtime);
            }
            _ => return Err("expected simulate".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_replay_with_resets() -> TestResult {
        let cli = Cli::try_parse_from([
            "tireviz",
            "-vv",
            "--json",
            "replay",
            "lap.json",
            "--reset-at",
            "100",
            "--reset-at",
            "250",
            "--every",
            "60",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Replay { file, run } => {
                assert_eq!(file, PathBuf::from("lap.json"));
                assert_eq!(run.reset_at, vec![100, 250]);
                assert_eq!(run.every, Some(60));
            }
            _ => return Err("expected replay".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["tireviz", "config", "--json", "--config", "tune.yaml"])?;
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("tune.yaml")));
        assert!(matches!(cli.command, Commands::Config));
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_scenario() {
        assert!(matches!(
            Cli::try_parse_from(["tireviz", "simulate", "--scenario", "hairpin"]),
            Err(_)
        ));
    }

    #[test]
    fn parse_rejects_zero_interval() {
        assert!(matches!(
            Cli::try_parse_from(["tireviz", "simulate", "-s", "straight", "--every", "0"]),
            Err(_)
        ));
    }

    #[test]
    fn parse_record_requires_output() {
        assert!(matches!(
            Cli::try_parse_from(["tireviz", "record", "--scenario", "braking"]),
            Err(_)
        ));
    }

    #[test]
    fn load_config_defaults_without_path() -> TestResult {
        assert_eq!(load_config(None)?, ModelConfig::default());
        Ok(())
    }
}
