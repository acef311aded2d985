// src/org/mod.rs

//! Organization and account abstractions.
//!
//! The crawler never talks to AWS Organizations or STS directly. It works
//! against two traits:
//!
//! - [`Organization`] resolves account identifiers and provides the default
//!   access role.
//! - [`Account`] knows how to load credentials for a role and how to describe
//!   itself in an execution dump.
//!
//! [`Directory`] is an in-memory organization built from configuration and
//! [`StsAccount`] is the production account backed by `sts:AssumeRole`.
//! Tests plug in their own accounts.

pub mod directory;
pub mod sts;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::errors::Result;

pub use directory::Directory;
pub use sts::StsAccount;

/// Boxed, sendable future used at the trait seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Why an account could not load credentials.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The provider refused the role assumption (access denied, missing
    /// trust relationship, ...). `code` is the provider's error code.
    #[error("authorization failed ({code}): {message}")]
    Auth { code: String, message: String },

    /// Anything else: transport failures, malformed responses, bugs.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl CredentialError {
    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        CredentialError::Auth {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CredentialError::Other(Box::new(err))
    }
}

/// A member account of an organization.
pub trait Account: Send + Sync + 'static {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Assume `role` in this account and keep the resulting credentials.
    fn load_credentials<'a>(&'a self, role: &'a str)
    -> BoxFuture<'a, std::result::Result<(), CredentialError>>;

    /// Structured description used by execution dumps.
    fn dump(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.id(), "name": self.name() })
    }
}

pub trait Organization: Send + Sync + 'static {
    type Account: Account;

    /// Role assumed in member accounts unless the crawler overrides it.
    fn access_role(&self) -> &str;

    fn accounts(&self) -> Vec<Arc<Self::Account>>;

    /// Look an account up by id or name.
    ///
    /// Fails with [`CrawlerError::AccountNotFound`](crate::errors::CrawlerError::AccountNotFound).
    fn get_account(&self, identifier: &str) -> Result<Arc<Self::Account>>;
}
