#![allow(dead_code)]

use std::sync::Arc;

use orgcrawler::config::{AccountEntry, ConfigFile, CrawlerSection, OrganizationSection, RawConfigFile};
use orgcrawler::org::Directory;
use orgcrawler::types::StringOrList;

use crate::fake_account::{CredentialBehaviour, FakeAccount};

/// Builder for an in-memory organization of [`FakeAccount`]s.
pub struct OrganizationBuilder {
    access_role: String,
    accounts: Vec<FakeAccount>,
}

impl OrganizationBuilder {
    pub fn new() -> Self {
        Self {
            access_role: "OrganizationAccountAccessRole".to_string(),
            accounts: Vec::new(),
        }
    }

    pub fn access_role(mut self, role: &str) -> Self {
        self.access_role = role.to_string();
        self
    }

    pub fn with_account(mut self, id: &str, name: &str) -> Self {
        self.accounts.push(FakeAccount::new(id, name));
        self
    }

    pub fn with_account_behaviour(
        mut self,
        id: &str,
        name: &str,
        behaviour: CredentialBehaviour,
    ) -> Self {
        self.accounts
            .push(FakeAccount::with_behaviour(id, name, behaviour));
        self
    }

    /// Add `count` well-behaved accounts named `acct-<n>`.
    pub fn with_accounts(mut self, count: usize) -> Self {
        let start = self.accounts.len();
        for i in start..start + count {
            self.accounts
                .push(FakeAccount::new(&format!("{:012}", i + 1), &format!("acct-{i}")));
        }
        self
    }

    pub fn build(self) -> Arc<Directory<FakeAccount>> {
        Arc::new(Directory::new(self.access_role, self.accounts))
    }
}

impl Default for OrganizationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                organization: OrganizationSection {
                    access_role: "OrganizationAccountAccessRole".to_string(),
                    accounts: Vec::new(),
                },
                crawler: CrawlerSection::default(),
            },
        }
    }

    pub fn with_account(mut self, id: &str, name: &str) -> Self {
        self.config.organization.accounts.push(AccountEntry {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn regions(mut self, regions: &[&str]) -> Self {
        self.config.crawler.regions = Some(StringOrList::Many(
            regions.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.crawler.workers = Some(workers);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
