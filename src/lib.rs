// src/lib.rs

pub mod cli;
pub mod config;
pub mod crawler;
pub mod errors;
pub mod logging;
pub mod org;
pub mod payloads;
pub mod regions;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use aws_config::BehaviorVersion;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::crawler::{
    AccountSelector, Crawler, CrawlerOptions, ExecuteOptions, RegionSelector,
};
use crate::org::{Account, Directory, StsAccount};
use crate::payloads::CallerIdentity;
use crate::types::ErrorPolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the organization directory (one `StsAccount` per configured account)
/// - credential loading
/// - the `caller_identity` payload run, dumped to stdout as JSON
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let (crawler_options, execute_options) = resolve_options(&cfg, &args);

    let sts = sts_client(args.dry_run).await;
    let org = Arc::new(build_organization(&cfg, &sts));

    let mut crawler = Crawler::new(org, crawler_options)?;

    if args.dry_run {
        print_dry_run(&crawler, &execute_options);
        return Ok(());
    }

    crawler.load_account_credentials().await?;

    let execution = crawler.execute(CallerIdentity, execute_options).await?;
    info!(
        payload = %execution.name(),
        responses = execution.responses().len(),
        has_errors = execution.has_errors(),
        "writing execution dump"
    );
    println!("{}", execution.to_json_pretty()?);

    Ok(())
}

/// Merge the config file with CLI overrides (CLI wins).
pub fn resolve_options(cfg: &ConfigFile, args: &CliArgs) -> (CrawlerOptions, ExecuteOptions) {
    let mut crawler_options = cfg.crawler_options();
    let mut execute_options = cfg.execute_options();

    if let Some(role) = &args.role {
        crawler_options = crawler_options.access_role(role.clone());
    }
    if let Some(accounts) = &args.accounts {
        crawler_options = crawler_options.accounts(AccountSelector::named(accounts.iter().cloned()));
    }
    if let Some(regions) = &args.regions {
        crawler_options = crawler_options.regions(RegionSelector::named(regions.iter().cloned()));
    }
    if let Some(workers) = args.workers {
        execute_options = execute_options.workers(workers);
    }
    if args.collect_errors {
        execute_options = execute_options.error_policy(ErrorPolicy::Collect);
    }

    debug!(?crawler_options, ?execute_options, "resolved options");
    (crawler_options, execute_options)
}

/// STS client for the management account; member accounts are reached
/// through it.
///
/// Dry runs get a client built from an empty config, so no credential or
/// region provider (environment, profile files, IMDS) is consulted.
pub async fn sts_client(dry_run: bool) -> aws_sdk_sts::Client {
    if dry_run {
        let conf = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        return aws_sdk_sts::Client::from_conf(conf);
    }
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    aws_sdk_sts::Client::new(&sdk_config)
}

/// Organization directory for the configured accounts.
pub fn build_organization(cfg: &ConfigFile, sts: &aws_sdk_sts::Client) -> Directory<StsAccount> {
    let accounts = cfg
        .organization
        .accounts
        .iter()
        .map(|entry| StsAccount::new(entry.id.clone(), entry.name.clone(), sts.clone()))
        .collect();
    Directory::new(cfg.organization.access_role.clone(), accounts)
}

/// Simple dry-run output: role, accounts, regions and target count.
fn print_dry_run(crawler: &Crawler<Directory<StsAccount>>, options: &ExecuteOptions) {
    println!("orgcrawl dry-run");
    println!("  access_role = {}", crawler.access_role());
    println!("  error_policy = {:?}", options.error_policy);
    if let Some(workers) = options.workers {
        println!("  workers = {workers}");
    }
    println!();

    println!("accounts ({}):", crawler.accounts().len());
    for account in crawler.accounts() {
        println!("  - {} ({})", account.name(), account.id());
    }

    println!("regions ({}):", crawler.regions().len());
    for region in crawler.regions() {
        println!("  - {region}");
    }

    println!();
    println!("targets: {}", crawler.targets().len());

    debug!("dry-run complete (no execution)");
}
