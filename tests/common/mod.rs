#![allow(dead_code)]

pub use orgcrawler_test_utils::builders::{ConfigFileBuilder, OrganizationBuilder};
pub use orgcrawler_test_utils::fake_account::{CredentialBehaviour, FakeAccount, UnexpectedFailure};
pub use orgcrawler_test_utils::{init_tracing, with_timeout};

use std::sync::Arc;

use orgcrawler::crawler::{Crawler, CrawlerOptions};
use orgcrawler::org::Directory;

/// Three accounts: prod, dev, audit.
pub fn three_account_org() -> Arc<Directory<FakeAccount>> {
    OrganizationBuilder::new()
        .access_role("Auditor")
        .with_account("111111111111", "prod")
        .with_account("222222222222", "dev")
        .with_account("333333333333", "audit")
        .build()
}

pub fn crawler(
    org: Arc<Directory<FakeAccount>>,
    options: CrawlerOptions,
) -> Crawler<Directory<FakeAccount>> {
    Crawler::new(org, options).expect("valid crawler options")
}
