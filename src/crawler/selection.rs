// src/crawler/selection.rs

//! Account and region selection, validated against the organization and the
//! region registry.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{CrawlerError, Result};
use crate::org::{Account, Organization};
use crate::regions::{DEFAULT_REGION, GLOBAL, RegionRegistry};

/// Which accounts to crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccountSelector {
    /// Every account in the organization.
    #[default]
    All,
    /// Accounts looked up by id or name.
    Named(Vec<String>),
}

impl AccountSelector {
    pub fn one(identifier: impl Into<String>) -> Self {
        AccountSelector::Named(vec![identifier.into()])
    }

    pub fn named<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccountSelector::Named(identifiers.into_iter().map(Into::into).collect())
    }
}

/// Which regions to crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionSelector {
    /// Every region the registry knows.
    #[default]
    All,
    /// Run once, in [`DEFAULT_REGION`].
    Global,
    /// Explicit region identifiers. `["GLOBAL"]` behaves like `Global` and an
    /// empty list falls back to [`DEFAULT_REGION`].
    Named(Vec<String>),
}

impl RegionSelector {
    pub fn one(region: impl Into<String>) -> Self {
        RegionSelector::Named(vec![region.into()])
    }

    pub fn named<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RegionSelector::Named(regions.into_iter().map(Into::into).collect())
    }
}

/// Resolve the selector to concrete accounts, dropping duplicates.
pub fn resolve_accounts<O: Organization>(
    org: &O,
    selector: &AccountSelector,
) -> Result<Vec<Arc<O::Account>>> {
    let candidates = match selector {
        AccountSelector::All => org.accounts(),
        AccountSelector::Named(identifiers) => {
            let mut resolved = Vec::with_capacity(identifiers.len());
            let mut missing = Vec::new();
            for identifier in identifiers {
                match org.get_account(identifier) {
                    Ok(account) => resolved.push(account),
                    Err(CrawlerError::AccountNotFound(id)) => missing.push(id),
                    Err(other) => return Err(other),
                }
            }
            if !missing.is_empty() {
                return Err(CrawlerError::ConfigError(format!(
                    "account(s) not found in organization: {}",
                    missing.join(", ")
                )));
            }
            resolved
        }
    };

    let mut accounts: Vec<Arc<O::Account>> = Vec::with_capacity(candidates.len());
    for account in candidates {
        if accounts.iter().any(|a| a.id() == account.id()) {
            debug!(account = %account.name(), "dropping duplicate account selection");
            continue;
        }
        accounts.push(account);
    }

    if accounts.is_empty() {
        return Err(CrawlerError::ConfigError(
            "account selection resolved to no accounts".to_string(),
        ));
    }

    Ok(accounts)
}

/// Resolve the selector to a non-empty list of known regions.
pub fn resolve_regions(registry: &dyn RegionRegistry, selector: &RegionSelector) -> Result<Vec<String>> {
    let requested = match selector {
        RegionSelector::All => registry.all_regions(),
        RegionSelector::Global => vec![DEFAULT_REGION.to_string()],
        RegionSelector::Named(names) if names.iter().all(|r| r == GLOBAL) => {
            vec![DEFAULT_REGION.to_string()]
        }
        RegionSelector::Named(names) => names.clone(),
    };

    let invalid: Vec<&str> = requested
        .iter()
        .filter(|r| !registry.is_known(r))
        .map(String::as_str)
        .collect();
    if !invalid.is_empty() {
        return Err(CrawlerError::ConfigError(format!(
            "invalid region(s): {}",
            invalid.join(", ")
        )));
    }

    let mut regions: Vec<String> = Vec::with_capacity(requested.len());
    for region in requested {
        if !regions.contains(&region) {
            regions.push(region);
        }
    }

    if regions.is_empty() {
        regions.push(DEFAULT_REGION.to_string());
    }

    Ok(regions)
}
