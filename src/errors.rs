// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::sync::Arc;

use thiserror::Error;

use crate::crawler::PayloadError;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The role could not be assumed in one of the target accounts.
    #[error("cannot assume role {role} in account {account}: {code}")]
    AssumeRole {
        role: String,
        account: String,
        code: String,
    },

    /// Credential loading failed for a reason other than authorization.
    ///
    /// `source` is the error the account reported, untouched, so callers can
    /// downcast it.
    #[error("loading credentials for account {account} failed: {source}")]
    Credentials {
        account: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A payload failed on at least one target. `source` is the error of
    /// one representative failed response.
    #[error(
        "encountered {failed} error(s) while running \"{payload}\". Example: [{account} / {region}] {source}"
    )]
    PayloadFailures {
        payload: String,
        failed: usize,
        account: String,
        region: String,
        #[source]
        source: Arc<PayloadError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CrawlerError>;
