// src/crawler/execution.rs

//! Per-target responses and the execution that aggregates them.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::crawler::timer::{Timer, TimerRecord};
use crate::errors::{CrawlerError, Result};
use crate::org::Account;

/// Failure captured from one payload invocation.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error(transparent)]
    Failed(#[from] anyhow::Error),

    #[error("payload panicked: {0}")]
    Panicked(String),

    #[error("payload output could not be serialized: {0}")]
    Output(#[source] serde_json::Error),

    /// The worker running this target ended without reporting back.
    #[error("worker stopped before reporting a result")]
    Lost,
}

/// Outcome of running a payload against one target.
#[derive(Debug)]
pub struct Response<A> {
    region: String,
    account: Arc<A>,
    output: Option<serde_json::Value>,
    failure: Option<Arc<PayloadError>>,
    pub(crate) timer: Timer,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    pub region: String,
    pub account: serde_json::Value,
    pub payload_output: Option<serde_json::Value>,
    pub error: Option<String>,
    pub statistics: TimerRecord,
}

impl<A: Account> Response<A> {
    pub fn new(region: impl Into<String>, account: Arc<A>) -> Self {
        Self {
            region: region.into(),
            account,
            output: None,
            failure: None,
            timer: Timer::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account(&self) -> &Arc<A> {
        &self.account
    }

    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.as_ref()
    }

    pub fn failure(&self) -> Option<&PayloadError> {
        self.failure.as_deref()
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub(crate) fn set_output(&mut self, output: serde_json::Value) {
        self.output = Some(output);
    }

    pub(crate) fn set_failure(&mut self, failure: PayloadError) {
        self.failure = Some(Arc::new(failure));
    }

    pub fn dump(&self) -> ResponseRecord {
        ResponseRecord {
            region: self.region.clone(),
            account: self.account.dump(),
            payload_output: self.output.clone(),
            error: self.failure.as_ref().map(|e| format!("{e:#}")),
            statistics: self.timer.dump(),
        }
    }
}

/// Every response from one payload run, plus timing.
#[derive(Debug)]
pub struct Execution<A> {
    name: String,
    responses: Vec<Response<A>>,
    has_errors: bool,
    pub(crate) timer: Timer,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub name: String,
    pub has_errors: bool,
    pub responses: Vec<ResponseRecord>,
    pub statistics: TimerRecord,
}

impl<A> Execution<A> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A: Account> Execution<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Vec::new(),
            has_errors: false,
            timer: Timer::new(),
        }
    }

    /// Responses in completion order.
    pub fn responses(&self) -> &[Response<A>] {
        &self.responses
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn failures(&self) -> impl Iterator<Item = &Response<A>> {
        self.responses.iter().filter(|r| r.is_failure())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub(crate) fn push(&mut self, response: Response<A>) {
        self.has_errors |= response.is_failure();
        self.responses.push(response);
    }

    /// Error describing the failed responses, if there are any.
    ///
    /// The example is the most recently completed failure; its error is
    /// shared with the response, not copied.
    pub fn failure_report(&self) -> Option<CrawlerError> {
        let example = self.failures().last()?;
        let source = example.failure.as_ref().map(Arc::clone)?;

        Some(CrawlerError::PayloadFailures {
            payload: self.name.clone(),
            failed: self.failure_count(),
            account: example.account().name().to_string(),
            region: example.region().to_string(),
            source,
        })
    }

    pub fn dump(&self) -> ExecutionRecord {
        ExecutionRecord {
            name: self.name.clone(),
            has_errors: self.has_errors,
            responses: self.responses.iter().map(Response::dump).collect(),
            statistics: self.timer.dump(),
        }
    }

    /// Pretty JSON of [`Execution::dump`].
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.dump())?)
    }
}
