// src/crawler/target.rs

//! Units of work: one (region, account) pair each.

use std::sync::Arc;

use crate::org::Account;

/// One region in one account.
#[derive(Debug)]
pub struct TaskTarget<A> {
    region: String,
    account: Arc<A>,
}

impl<A> Clone for TaskTarget<A> {
    fn clone(&self) -> Self {
        Self {
            region: self.region.clone(),
            account: Arc::clone(&self.account),
        }
    }
}

impl<A: Account> TaskTarget<A> {
    pub fn new(region: impl Into<String>, account: Arc<A>) -> Self {
        Self {
            region: region.into(),
            account,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account(&self) -> &Arc<A> {
        &self.account
    }

    pub fn into_parts(self) -> (String, Arc<A>) {
        (self.region, self.account)
    }
}

/// Expand regions x accounts, region-major.
pub fn cross_product<A: Account>(regions: &[String], accounts: &[Arc<A>]) -> Vec<TaskTarget<A>> {
    regions
        .iter()
        .flat_map(|region| {
            accounts
                .iter()
                .map(move |account| TaskTarget::new(region.clone(), Arc::clone(account)))
        })
        .collect()
}
