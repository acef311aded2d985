// src/payloads.rs

//! Payloads shipped with `orgcrawl`.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::crawler::Payload;
use crate::org::{BoxFuture, StsAccount};

/// `sts:GetCallerIdentity` in every target, proving the assumed role works
/// in that account and region.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerIdentity;

#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

impl Payload<StsAccount> for CallerIdentity {
    type Output = Identity;

    fn name(&self) -> &str {
        "caller_identity"
    }

    fn run(
        &self,
        region: String,
        account: Arc<StsAccount>,
    ) -> BoxFuture<'_, anyhow::Result<Identity>> {
        Box::pin(async move {
            let config = account.sdk_config(&region).await?;
            let client = aws_sdk_sts::Client::new(&config);
            let output = client
                .get_caller_identity()
                .send()
                .await
                .with_context(|| format!("GetCallerIdentity in {region}"))?;

            Ok(Identity {
                account: output.account().map(str::to_string),
                arn: output.arn().map(str::to_string),
                user_id: output.user_id().map(str::to_string),
            })
        })
    }
}
