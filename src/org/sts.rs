// src/org/sts.rs

//! Accounts backed by `sts:AssumeRole`.

use std::sync::RwLock;
use std::time::SystemTime;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_sts::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_sts::operation::assume_role::AssumeRoleError;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::{CrawlerError, Result};
use crate::org::{Account, BoxFuture, CredentialError};

const SESSION_NAME: &str = "orgcrawler";
const PROVIDER_NAME: &str = "orgcrawler-assume-role";

#[derive(Error, Debug)]
#[error("AssumeRole for {0} returned no credentials")]
struct MissingCredentials(String);

/// Member account reached by assuming a role from the caller's identity.
///
/// `client` is an STS client built from the management account's config.
/// Credentials are kept after [`Account::load_credentials`] and used to build
/// per-region SDK configs for payloads.
#[derive(Debug)]
pub struct StsAccount {
    id: String,
    name: String,
    client: aws_sdk_sts::Client,
    credentials: RwLock<Option<Credentials>>,
}

impl StsAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>, client: aws_sdk_sts::Client) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client,
            credentials: RwLock::new(None),
        }
    }

    pub fn role_arn(&self, role: &str) -> String {
        format!("arn:aws:iam::{}:role/{}", self.id, role)
    }

    /// Credentials from the last successful role assumption.
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// SDK config for `region` signed with this account's credentials.
    pub async fn sdk_config(&self, region: &str) -> Result<SdkConfig> {
        let credentials = self.credentials().ok_or_else(|| {
            CrawlerError::Other(anyhow::anyhow!(
                "credentials for account {} ({}) have not been loaded",
                self.name,
                self.id
            ))
        })?;

        Ok(aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .load()
            .await)
    }

    async fn assume_role(&self, role: &str) -> std::result::Result<(), CredentialError> {
        let role_arn = self.role_arn(role);
        debug!(account = %self.name, role_arn = %role_arn, "assuming role");

        let output = self
            .client
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(SESSION_NAME)
            .send()
            .await
            .map_err(classify_assume_role_error)?;

        let issued = output
            .credentials()
            .ok_or_else(|| CredentialError::other(MissingCredentials(role_arn.clone())))?;

        let credentials = Credentials::new(
            issued.access_key_id(),
            issued.secret_access_key(),
            Some(issued.session_token().to_string()),
            SystemTime::try_from(*issued.expiration()).ok(),
            PROVIDER_NAME,
        );

        match self.credentials.write() {
            Ok(mut guard) => *guard = Some(credentials),
            Err(poisoned) => *poisoned.into_inner() = Some(credentials),
        }

        info!(account = %self.name, role_arn = %role_arn, "credentials loaded");
        Ok(())
    }
}

/// Service errors are authorization-class; everything else is unexpected.
fn classify_assume_role_error(err: SdkError<AssumeRoleError>) -> CredentialError {
    match err.as_service_error() {
        Some(service_err) => CredentialError::auth(
            service_err.code().unwrap_or("Unknown"),
            service_err.message().unwrap_or_default(),
        ),
        None => CredentialError::other(err),
    }
}

impl Account for StsAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load_credentials<'a>(
        &'a self,
        role: &'a str,
    ) -> BoxFuture<'a, std::result::Result<(), CredentialError>> {
        Box::pin(self.assume_role(role))
    }

    fn dump(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "credentials_loaded": self.credentials().is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> StsAccount {
        let conf = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        StsAccount::new("123456789012", "prod", aws_sdk_sts::Client::from_conf(conf))
    }

    #[test]
    fn role_arn_targets_member_account() {
        assert_eq!(
            account().role_arn("OrganizationAccountAccessRole"),
            "arn:aws:iam::123456789012:role/OrganizationAccountAccessRole"
        );
    }

    #[tokio::test]
    async fn sdk_config_requires_loaded_credentials() {
        let acct = account();
        assert!(acct.credentials().is_none());
        assert!(acct.sdk_config("eu-west-1").await.is_err());
        assert_eq!(acct.dump()["credentials_loaded"], false);
    }
}
