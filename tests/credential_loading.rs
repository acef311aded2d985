// tests/credential_loading.rs

mod common;
use crate::common::{
    CredentialBehaviour, OrganizationBuilder, UnexpectedFailure, crawler, init_tracing,
    three_account_org, with_timeout,
};

use orgcrawler::crawler::{CrawlerOptions, RegionSelector};
use orgcrawler::errors::CrawlerError;
use orgcrawler::org::Organization;

#[tokio::test]
async fn loads_credentials_in_every_selected_account() {
    init_tracing();
    let org = three_account_org();
    let mut c = crawler(
        org.clone(),
        CrawlerOptions::default()
            .access_role("ReadOnly")
            .regions(RegionSelector::Global),
    );

    with_timeout(c.load_account_credentials()).await.unwrap();

    for account in org.accounts() {
        assert_eq!(account.assumed_roles(), vec!["ReadOnly".to_string()]);
    }
    assert!(c.timer().elapsed().is_some());
}

#[tokio::test]
async fn authorization_failure_names_role_account_and_code() {
    init_tracing();
    let org = OrganizationBuilder::new()
        .access_role("Auditor")
        .with_account("111111111111", "prod")
        .with_account_behaviour(
            "222222222222",
            "locked",
            CredentialBehaviour::Deny("AccessDenied".to_string()),
        )
        .build();
    let mut c = crawler(org.clone(), CrawlerOptions::default().regions(RegionSelector::Global));

    let err = with_timeout(c.load_account_credentials()).await.unwrap_err();

    match &err {
        CrawlerError::AssumeRole {
            role,
            account,
            code,
        } => {
            assert_eq!(role, "Auditor");
            assert_eq!(account, "locked");
            assert_eq!(code, "AccessDenied");
        }
        other => panic!("Expected AssumeRole, got: {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "cannot assume role Auditor in account locked: AccessDenied"
    );

    // Every worker still ran to completion.
    for account in org.accounts() {
        assert_eq!(account.load_count(), 1);
    }
}

#[tokio::test]
async fn authorization_failure_wins_over_unexpected_failure() {
    let org = OrganizationBuilder::new()
        .with_account_behaviour(
            "111111111111",
            "broken",
            CredentialBehaviour::Break("socket closed".to_string()),
        )
        .with_account_behaviour(
            "222222222222",
            "denied",
            CredentialBehaviour::Deny("AccessDenied".to_string()),
        )
        .build();
    let mut c = crawler(org, CrawlerOptions::default().regions(RegionSelector::Global));

    let err = with_timeout(c.load_account_credentials()).await.unwrap_err();
    assert!(matches!(err, CrawlerError::AssumeRole { .. }));
}

#[tokio::test]
async fn unexpected_failure_keeps_original_error() {
    let org = OrganizationBuilder::new()
        .with_account("111111111111", "prod")
        .with_account_behaviour(
            "222222222222",
            "flaky",
            CredentialBehaviour::Break("socket closed".to_string()),
        )
        .build();
    let mut c = crawler(org, CrawlerOptions::default().regions(RegionSelector::Global));

    let err = with_timeout(c.load_account_credentials()).await.unwrap_err();

    match err {
        CrawlerError::Credentials { account, source } => {
            assert_eq!(account, "flaky");
            let original = source
                .downcast_ref::<UnexpectedFailure>()
                .expect("source should be the account's own error");
            assert_eq!(original, &UnexpectedFailure("socket closed".to_string()));
        }
        other => panic!("Expected Credentials, got: {:?}", other),
    }
}

#[tokio::test]
async fn panicking_credential_provider_is_reported() {
    let org = OrganizationBuilder::new()
        .with_account("111111111111", "prod")
        .with_account_behaviour("222222222222", "chaos", CredentialBehaviour::Panic)
        .build();
    let mut c = crawler(org, CrawlerOptions::default().regions(RegionSelector::Global));

    let err = with_timeout(c.load_account_credentials()).await.unwrap_err();

    match err {
        CrawlerError::Credentials { account, source } => {
            assert_eq!(account, "chaos");
            assert!(source.to_string().contains("credential provider exploded"));
        }
        other => panic!("Expected Credentials, got: {:?}", other),
    }
}
