// src/logging.rs

//! Logging setup for `orgcrawl` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. the `--log-level` CLI flag
//! 2. the `ORGCRAWLER_LOG` environment variable, in `EnvFilter` syntax
//!    (`debug`, `orgcrawler::crawler=trace,aws_config=warn`, ...)
//! 3. `info`
//!
//! Logs go to STDERR so that stdout carries only the execution dump.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ORGCRAWLER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

/// Resolve the filter from the CLI flag and the raw env value.
///
/// An env value that does not parse falls back to the default.
fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_str());
    }
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
