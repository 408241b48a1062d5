//! CLI argument definitions using clap
//!
//! Commands:
//! - vehicles validate --config <path> [--revision <tag>] [--now <rfc3339>]
//! - vehicles indexes --config <path> [--revision <tag>]
//! - vehicles check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Revision-aware schema validator and index planner for vehicle listings
#[derive(Parser, Debug)]
#[command(name = "vehicles")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one listing record read from stdin
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./vehicles.json")]
        config: PathBuf,

        /// Revision to validate against (defaults to the record's tag)
        #[arg(long)]
        revision: Option<String>,

        /// Evaluation time for date bounds, RFC 3339 (defaults to the clock)
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the verified index plan of a revision
    Indexes {
        /// Path to configuration file
        #[arg(long, default_value = "./vehicles.json")]
        config: PathBuf,

        /// Revision to plan (defaults to the configured revision)
        #[arg(long)]
        revision: Option<String>,
    },

    /// Assemble every revision and verify every index plan
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./vehicles.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "vehicles",
            "validate",
            "--config",
            "cfg.json",
            "--revision",
            "v1",
            "--now",
            "2024-06-01T12:00:00Z",
        ])
        .unwrap();

        match cli.command {
            Command::Validate {
                config,
                revision,
                now,
            } => {
                assert_eq!(config, PathBuf::from("cfg.json"));
                assert_eq!(revision.as_deref(), Some("v1"));
                assert_eq!(now.as_deref(), Some("2024-06-01T12:00:00Z"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_default() {
        let cli = Cli::try_parse_from(["vehicles", "check"]).unwrap();
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("./vehicles.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
