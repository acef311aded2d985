// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CrawlerError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CrawlerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.organization, raw.crawler))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_accounts(cfg)?;
    validate_accounts(cfg)?;
    validate_access_role(cfg)?;
    validate_crawler_section(cfg)?;
    Ok(())
}

fn ensure_has_accounts(cfg: &RawConfigFile) -> Result<()> {
    if cfg.organization.accounts.is_empty() {
        return Err(CrawlerError::ConfigError(
            "config must contain at least one [[organization.account]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_accounts(cfg: &RawConfigFile) -> Result<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for account in cfg.organization.accounts.iter() {
        if account.id.len() != 12 || !account.id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CrawlerError::ConfigError(format!(
                "account '{}' has invalid id '{}' (expected 12 digits)",
                account.name, account.id
            )));
        }
        if account.name.trim().is_empty() {
            return Err(CrawlerError::ConfigError(format!(
                "account '{}' has an empty name",
                account.id
            )));
        }
        if !ids.insert(account.id.as_str()) {
            return Err(CrawlerError::ConfigError(format!(
                "duplicate account id '{}'",
                account.id
            )));
        }
        if !names.insert(account.name.as_str()) {
            return Err(CrawlerError::ConfigError(format!(
                "duplicate account name '{}'",
                account.name
            )));
        }
    }
    Ok(())
}

fn validate_access_role(cfg: &RawConfigFile) -> Result<()> {
    if cfg.organization.access_role.trim().is_empty() {
        return Err(CrawlerError::ConfigError(
            "[organization].access_role must not be empty".to_string(),
        ));
    }
    if let Some(role) = &cfg.crawler.access_role {
        if role.trim().is_empty() {
            return Err(CrawlerError::ConfigError(
                "[crawler].access_role must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_crawler_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.crawler.workers == Some(0) {
        return Err(CrawlerError::ConfigError(
            "[crawler].workers must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.crawler.history_capacity == 0 {
        return Err(CrawlerError::ConfigError(
            "[crawler].history_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
