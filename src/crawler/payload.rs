// src/crawler/payload.rs

//! The work a crawler runs once per (region, account) pair.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::org::{Account, BoxFuture};

/// User-supplied work.
///
/// `name` identifies the resulting execution in the crawler's history.
/// Extra arguments are carried by the implementor (or captured by the closure
/// given to [`FnPayload`]).
pub trait Payload<A: Account>: Send + Sync + 'static {
    type Output: Serialize + Send + 'static;

    fn name(&self) -> &str;

    fn run(&self, region: String, account: Arc<A>) -> BoxFuture<'_, anyhow::Result<Self::Output>>;
}

/// Adapts an async closure into a named [`Payload`].
pub struct FnPayload<F> {
    name: String,
    f: F,
}

impl<F> FnPayload<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<A, F, Fut, T> Payload<A> for FnPayload<F>
where
    A: Account,
    F: Fn(String, Arc<A>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, region: String, account: Arc<A>) -> BoxFuture<'_, anyhow::Result<T>> {
        Box::pin((self.f)(region, account))
    }
}
