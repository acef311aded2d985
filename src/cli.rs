// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `orgcrawl`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "orgcrawl",
    version,
    about = "Run an STS caller-identity check in every account and region of an AWS organization.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Orgcrawler.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Account ids or names to crawl (comma separated). Overrides the config.
    #[arg(long, value_name = "ACCOUNT", value_delimiter = ',')]
    pub accounts: Option<Vec<String>>,

    /// Regions to crawl (comma separated), or `GLOBAL`. Overrides the config.
    #[arg(long, value_name = "REGION", value_delimiter = ',')]
    pub regions: Option<Vec<String>>,

    /// Role to assume in each account. Overrides the config.
    #[arg(long, value_name = "ROLE")]
    pub role: Option<String>,

    /// Worker pool size for the payload run.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Print the execution even if some targets failed.
    #[arg(long)]
    pub collect_errors: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ORGCRAWLER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve accounts and regions and print the targets, without calling AWS.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_comma_separated_lists() {
        let args = CliArgs::parse_from([
            "orgcrawl",
            "--accounts",
            "prod,dev",
            "--regions",
            "us-east-1,eu-west-1",
            "--workers",
            "4",
        ]);
        assert_eq!(args.accounts, Some(vec!["prod".to_string(), "dev".to_string()]));
        assert_eq!(
            args.regions,
            Some(vec!["us-east-1".to_string(), "eu-west-1".to_string()])
        );
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.config, default_config_path());
        assert!(!args.dry_run);
    }
}
