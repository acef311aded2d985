// src/config/model.rs

use serde::Deserialize;

use crate::crawler::{
    AccountSelector, CrawlerOptions, DEFAULT_HISTORY_CAPACITY, ExecuteOptions, RegionSelector,
};
use crate::regions::GLOBAL;
use crate::types::{ErrorPolicy, StringOrList};

pub const DEFAULT_ACCESS_ROLE: &str = "OrganizationAccountAccessRole";

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [organization]
/// access_role = "OrganizationAccountAccessRole"
///
/// [[organization.account]]
/// id = "111111111111"
/// name = "prod"
///
/// [crawler]
/// accounts = "prod"
/// regions = ["us-east-1", "eu-west-1"]
/// workers = 8
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub organization: OrganizationSection,

    #[serde(default)]
    pub crawler: CrawlerSection,
}

/// Validated configuration. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub organization: OrganizationSection,
    pub crawler: CrawlerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(organization: OrganizationSection, crawler: CrawlerSection) -> Self {
        Self {
            organization,
            crawler,
        }
    }

    pub fn crawler_options(&self) -> CrawlerOptions {
        CrawlerOptions {
            access_role: self.crawler.access_role.clone(),
            accounts: self.crawler.account_selector(),
            regions: self.crawler.region_selector(),
            history_capacity: self.crawler.history_capacity,
        }
    }

    pub fn execute_options(&self) -> ExecuteOptions {
        ExecuteOptions {
            workers: self.crawler.workers,
            error_policy: self.crawler.error_policy,
        }
    }
}

/// `[organization]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationSection {
    /// Role assumed in member accounts unless `[crawler].access_role` is set.
    #[serde(default = "default_access_role")]
    pub access_role: String,

    /// Member accounts, from `[[organization.account]]`.
    #[serde(default, rename = "account")]
    pub accounts: Vec<AccountEntry>,
}

fn default_access_role() -> String {
    DEFAULT_ACCESS_ROLE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountEntry {
    /// 12-digit AWS account id.
    pub id: String,
    pub name: String,
}

/// `[crawler]` section. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSection {
    #[serde(default)]
    pub access_role: Option<String>,

    /// Account ids or names; all organization accounts when omitted.
    #[serde(default)]
    pub accounts: Option<StringOrList>,

    /// Region identifiers or `"GLOBAL"`; every known region when omitted.
    #[serde(default)]
    pub regions: Option<StringOrList>,

    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for CrawlerSection {
    fn default() -> Self {
        Self {
            access_role: None,
            accounts: None,
            regions: None,
            workers: None,
            history_capacity: default_history_capacity(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl CrawlerSection {
    pub fn account_selector(&self) -> AccountSelector {
        match &self.accounts {
            None => AccountSelector::All,
            Some(value) => AccountSelector::Named(value.clone().into_vec()),
        }
    }

    pub fn region_selector(&self) -> RegionSelector {
        match &self.regions {
            None => RegionSelector::All,
            Some(StringOrList::One(s)) if s == GLOBAL => RegionSelector::Global,
            Some(value) => RegionSelector::Named(value.clone().into_vec()),
        }
    }
}
