// tests/config_loading.rs

mod common;
use crate::common::ConfigFileBuilder;

use std::io::Write;

use clap::Parser;
use orgcrawler::cli::CliArgs;
use orgcrawler::config::load_and_validate;
use orgcrawler::config::model::ConfigFile;
use orgcrawler::crawler::{AccountSelector, RegionSelector};
use orgcrawler::errors::CrawlerError;
use orgcrawler::{resolve_options, run, sts_client};
use orgcrawler::types::ErrorPolicy;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_maps_to_crawler_options() {
    let file = write_config(
        r#"
[organization]
access_role = "Auditor"

[[organization.account]]
id = "111111111111"
name = "prod"

[[organization.account]]
id = "222222222222"
name = "dev"

[crawler]
accounts = "prod"
regions = ["us-east-1", "eu-west-1"]
workers = 4
history_capacity = 8
error_policy = "collect"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let options = cfg.crawler_options();
    assert_eq!(options.access_role, None);
    assert_eq!(options.accounts, AccountSelector::one("prod"));
    assert_eq!(
        options.regions,
        RegionSelector::named(["us-east-1", "eu-west-1"])
    );
    assert_eq!(options.history_capacity, 8);

    let exec = cfg.execute_options();
    assert_eq!(exec.workers, Some(4));
    assert_eq!(exec.error_policy, ErrorPolicy::Collect);
    assert_eq!(cfg.organization.access_role, "Auditor");
}

#[test]
fn omitted_selectors_mean_everything_and_global_string_is_global() {
    let file = write_config(
        r#"
[[organization.account]]
id = "111111111111"
name = "prod"

[crawler]
regions = "GLOBAL"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let options = cfg.crawler_options();
    assert_eq!(options.accounts, AccountSelector::All);
    assert_eq!(options.regions, RegionSelector::Global);
    assert_eq!(cfg.organization.access_role, "OrganizationAccountAccessRole");
    assert_eq!(cfg.execute_options().error_policy, ErrorPolicy::Fail);
}

#[test]
fn non_string_regions_are_rejected() {
    let file = write_config(
        r#"
[[organization.account]]
id = "111111111111"
name = "prod"

[crawler]
regions = 42
"#,
    );

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(CrawlerError::TomlError(_))));
}

#[test]
fn invalid_account_id_returns_config_error() {
    let file = write_config(
        r#"
[[organization.account]]
id = "12345"
name = "prod"
"#,
    );

    match load_and_validate(file.path()) {
        Err(CrawlerError::ConfigError(msg)) => {
            assert!(msg.contains("12345"));
            assert!(msg.contains("12 digits"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn duplicate_account_names_return_config_error() {
    let raw = ConfigFileBuilder::new()
        .with_account("111111111111", "prod")
        .with_account("222222222222", "prod")
        .raw();

    match ConfigFile::try_from(raw) {
        Err(CrawlerError::ConfigError(msg)) => assert!(msg.contains("duplicate account name")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_workers_return_config_error() {
    let raw = ConfigFileBuilder::new()
        .with_account("111111111111", "prod")
        .workers(0)
        .raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrawlerError::ConfigError(_))
    ));
}

#[test]
fn empty_organization_returns_config_error() {
    let raw = ConfigFileBuilder::new().raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrawlerError::ConfigError(_))
    ));
}

#[test]
fn cli_flags_override_config() {
    let cfg = ConfigFileBuilder::new()
        .with_account("111111111111", "prod")
        .with_account("222222222222", "dev")
        .regions(&["us-east-1"])
        .workers(4)
        .build();
    let args = CliArgs::parse_from([
        "orgcrawl",
        "--accounts",
        "dev",
        "--regions",
        "GLOBAL",
        "--role",
        "ReadOnly",
        "--workers",
        "16",
        "--collect-errors",
    ]);

    let (crawler_options, execute_options) = resolve_options(&cfg, &args);
    assert_eq!(crawler_options.access_role.as_deref(), Some("ReadOnly"));
    assert_eq!(crawler_options.accounts, AccountSelector::one("dev"));
    assert_eq!(crawler_options.regions, RegionSelector::one("GLOBAL"));
    assert_eq!(execute_options.workers, Some(16));
    assert_eq!(execute_options.error_policy, ErrorPolicy::Collect);
}

#[tokio::test]
async fn dry_run_client_skips_provider_chain() {
    let client = sts_client(true).await;
    assert!(client.config().region().is_none());
    assert!(client.config().credentials_provider().is_none());
}

#[tokio::test]
async fn dry_run_completes_from_config_alone() {
    let file = write_config(
        r#"
[[organization.account]]
id = "111111111111"
name = "prod"

[crawler]
regions = "GLOBAL"
"#,
    );
    let path = file.path().to_str().unwrap();
    let args = CliArgs::parse_from(["orgcrawl", "--config", path, "--dry-run"]);

    run(args).await.unwrap();
}
