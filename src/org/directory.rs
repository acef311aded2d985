// src/org/directory.rs

//! In-memory organization.

use std::sync::Arc;

use crate::errors::{CrawlerError, Result};
use crate::org::{Account, Organization};

/// An organization whose member accounts are known up front.
///
/// Lookup order follows insertion order; ids win over names when an
/// identifier happens to match both.
#[derive(Debug)]
pub struct Directory<A> {
    access_role: String,
    accounts: Vec<Arc<A>>,
}

impl<A: Account> Directory<A> {
    pub fn new(access_role: impl Into<String>, accounts: Vec<A>) -> Self {
        Self {
            access_role: access_role.into(),
            accounts: accounts.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl<A: Account> Organization for Directory<A> {
    type Account = A;

    fn access_role(&self) -> &str {
        &self.access_role
    }

    fn accounts(&self) -> Vec<Arc<A>> {
        self.accounts.clone()
    }

    fn get_account(&self, identifier: &str) -> Result<Arc<A>> {
        self.accounts
            .iter()
            .find(|a| a.id() == identifier)
            .or_else(|| self.accounts.iter().find(|a| a.name() == identifier))
            .cloned()
            .ok_or_else(|| CrawlerError::AccountNotFound(identifier.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::{BoxFuture, CredentialError};

    struct Plain {
        id: &'static str,
        name: &'static str,
    }

    impl Account for Plain {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.name
        }

        fn load_credentials<'a>(
            &'a self,
            _role: &'a str,
        ) -> BoxFuture<'a, std::result::Result<(), CredentialError>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn directory() -> Directory<Plain> {
        Directory::new(
            "Auditor",
            vec![
                Plain { id: "111111111111", name: "prod" },
                Plain { id: "222222222222", name: "dev" },
            ],
        )
    }

    #[test]
    fn resolves_by_id_and_name() {
        let dir = directory();
        assert_eq!(dir.get_account("prod").unwrap().id(), "111111111111");
        assert_eq!(dir.get_account("222222222222").unwrap().name(), "dev");
        assert_eq!(dir.access_role(), "Auditor");
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        match directory().get_account("staging") {
            Err(CrawlerError::AccountNotFound(id)) => assert_eq!(id, "staging"),
            other => panic!("expected AccountNotFound, got {:?}", other.map(|a| a.id().to_string())),
        }
    }
}
