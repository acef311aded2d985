use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use orgcrawler::org::{Account, BoxFuture, CredentialError};

/// What a [`FakeAccount`] does when asked to load credentials.
#[derive(Debug, Clone)]
pub enum CredentialBehaviour {
    Succeed,
    /// Fail like a refused `AssumeRole` with this error code.
    Deny(String),
    /// Fail with an [`UnexpectedFailure`] carrying this message.
    Break(String),
    Panic,
}

/// Error used for non-authorization credential failures, so tests can
/// downcast the source of `CrawlerError::Credentials`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedFailure(pub String);

impl std::fmt::Display for UnexpectedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected failure: {}", self.0)
    }
}

impl std::error::Error for UnexpectedFailure {}

/// An account that:
/// - records which roles it was asked to assume
/// - loads credentials according to its [`CredentialBehaviour`].
#[derive(Debug)]
pub struct FakeAccount {
    id: String,
    name: String,
    behaviour: CredentialBehaviour,
    assumed: Mutex<Vec<String>>,
    loads: AtomicUsize,
}

impl FakeAccount {
    pub fn new(id: &str, name: &str) -> Self {
        Self::with_behaviour(id, name, CredentialBehaviour::Succeed)
    }

    pub fn with_behaviour(id: &str, name: &str, behaviour: CredentialBehaviour) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            behaviour,
            assumed: Mutex::new(Vec::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Roles passed to `load_credentials`, in call order.
    pub fn assumed_roles(&self) -> Vec<String> {
        self.assumed.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Account for FakeAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load_credentials<'a>(
        &'a self,
        role: &'a str,
    ) -> BoxFuture<'a, Result<(), CredentialError>> {
        Box::pin(async move {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.assumed.lock().unwrap().push(role.to_string());
            tokio::task::yield_now().await;

            match &self.behaviour {
                CredentialBehaviour::Succeed => Ok(()),
                CredentialBehaviour::Deny(code) => Err(CredentialError::auth(
                    code.clone(),
                    format!("not authorized to assume {role}"),
                )),
                CredentialBehaviour::Break(msg) => {
                    Err(CredentialError::other(UnexpectedFailure(msg.clone())))
                }
                CredentialBehaviour::Panic => panic!("credential provider exploded"),
            }
        })
    }

    fn dump(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.id, "name": self.name, "fake": true })
    }
}
