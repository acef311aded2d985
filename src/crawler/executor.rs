// src/crawler/executor.rs

//! The crawler: account/region selection, credential loading, and payload
//! fan-out across every (region, account) pair.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::crawler::execution::{Execution, PayloadError, Response};
use crate::crawler::history::{DEFAULT_HISTORY_CAPACITY, ExecutionHistory};
use crate::crawler::payload::Payload;
use crate::crawler::pool::{WorkerPool, catch_panic};
use crate::crawler::selection::{AccountSelector, RegionSelector, resolve_accounts, resolve_regions};
use crate::crawler::target::{TaskTarget, cross_product};
use crate::crawler::timer::Timer;
use crate::errors::{CrawlerError, Result};
use crate::org::{Account, CredentialError, Organization};
use crate::regions::{RegionRegistry, StaticRegions};
use crate::types::ErrorPolicy;

/// Upper bound for the default worker count of one `execute` call.
pub const DEFAULT_MAX_WORKERS: usize = 32;

/// How the crawler selects its accounts and regions.
#[derive(Debug, Clone)]
pub struct CrawlerOptions {
    /// Role to assume in member accounts; the organization's role if `None`.
    pub access_role: Option<String>,
    pub accounts: AccountSelector,
    pub regions: RegionSelector,
    pub history_capacity: usize,
}

impl Default for CrawlerOptions {
    fn default() -> Self {
        Self {
            access_role: None,
            accounts: AccountSelector::All,
            regions: RegionSelector::All,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl CrawlerOptions {
    pub fn access_role(mut self, role: impl Into<String>) -> Self {
        self.access_role = Some(role.into());
        self
    }

    pub fn accounts(mut self, accounts: AccountSelector) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn regions(mut self, regions: RegionSelector) -> Self {
        self.regions = regions;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Per-call options for [`Crawler::execute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions {
    /// Worker pool size. Defaults to the task count, capped at
    /// [`DEFAULT_MAX_WORKERS`].
    pub workers: Option<usize>,
    pub error_policy: ErrorPolicy,
}

impl ExecuteOptions {
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    fn pool_size(&self, task_count: usize) -> usize {
        self.workers
            .unwrap_or_else(|| task_count.min(DEFAULT_MAX_WORKERS))
            .max(1)
    }
}

/// Runs payloads across every selected account and region.
pub struct Crawler<O: Organization> {
    org: Arc<O>,
    registry: Arc<dyn RegionRegistry>,
    access_role: String,
    accounts: Vec<Arc<O::Account>>,
    regions: Vec<String>,
    history: ExecutionHistory<O::Account>,
    timer: Timer,
}

impl<O: Organization> Crawler<O> {
    /// Build a crawler that validates regions against [`StaticRegions`].
    pub fn new(org: Arc<O>, options: CrawlerOptions) -> Result<Self> {
        Self::with_registry(org, Arc::new(StaticRegions), options)
    }

    pub fn with_registry(
        org: Arc<O>,
        registry: Arc<dyn RegionRegistry>,
        options: CrawlerOptions,
    ) -> Result<Self> {
        if options.history_capacity == 0 {
            return Err(CrawlerError::ConfigError(
                "history capacity must be >= 1 (got 0)".to_string(),
            ));
        }

        let access_role = options
            .access_role
            .unwrap_or_else(|| org.access_role().to_string());
        if access_role.trim().is_empty() {
            return Err(CrawlerError::ConfigError(
                "access role must not be empty".to_string(),
            ));
        }

        let accounts = resolve_accounts(org.as_ref(), &options.accounts)?;
        let regions = resolve_regions(registry.as_ref(), &options.regions)?;

        debug!(
            role = %access_role,
            accounts = accounts.len(),
            regions = regions.len(),
            "crawler configured"
        );

        Ok(Self {
            org,
            registry,
            access_role,
            accounts,
            regions,
            history: ExecutionHistory::new(options.history_capacity),
            timer: Timer::new(),
        })
    }

    pub fn organization(&self) -> &Arc<O> {
        &self.org
    }

    pub fn access_role(&self) -> &str {
        &self.access_role
    }

    pub fn accounts(&self) -> &[Arc<O::Account>] {
        &self.accounts
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Replace the region set. On error the current regions are kept.
    pub fn update_regions(&mut self, selector: RegionSelector) -> Result<()> {
        self.regions = resolve_regions(self.registry.as_ref(), &selector)?;
        debug!(regions = ?self.regions, "regions updated");
        Ok(())
    }

    /// Every target the next `execute` call will run against.
    pub fn targets(&self) -> Vec<TaskTarget<O::Account>> {
        cross_product(&self.regions, &self.accounts)
    }

    /// Timing of the last credential load.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn history(&self) -> &ExecutionHistory<O::Account> {
        &self.history
    }

    /// Most recent execution of the payload called `name`.
    pub fn get_execution(&self, name: &str) -> Option<Arc<Execution<O::Account>>> {
        self.history.find(name)
    }

    /// Assume the access role in every selected account, all at once.
    ///
    /// Waits for every account. An authorization failure anywhere wins and is
    /// reported as [`CrawlerError::AssumeRole`]; otherwise the first
    /// unexpected failure is returned as [`CrawlerError::Credentials`] with
    /// the account's original error as its source.
    pub async fn load_account_credentials(&mut self) -> Result<()> {
        info!(
            role = %self.access_role,
            accounts = self.accounts.len(),
            "loading account credentials"
        );
        self.timer.start();

        let mut pool = WorkerPool::new(self.accounts.len());
        for account in &self.accounts {
            let account = Arc::clone(account);
            let role = self.access_role.clone();
            pool.spawn(async move {
                let name = account.name().to_string();
                let outcome = catch_panic(async move {
                    account.load_credentials(&role).await
                })
                .await;
                (name, outcome)
            });
        }
        let collected = pool.collect().await;
        self.timer.stop();

        let mut auth_failure: Option<CrawlerError> = None;
        let mut unexpected: Option<CrawlerError> = None;

        for (account, outcome) in collected.results {
            match outcome {
                Ok(Ok(())) => debug!(account = %account, "credentials ready"),
                Ok(Err(CredentialError::Auth { code, message })) => {
                    error!(
                        role = %self.access_role,
                        account = %account,
                        code = %code,
                        message = %message,
                        "cannot assume role"
                    );
                    auth_failure.get_or_insert(CrawlerError::AssumeRole {
                        role: self.access_role.clone(),
                        account,
                        code,
                    });
                }
                Ok(Err(CredentialError::Other(source))) => {
                    error!(account = %account, error = %source, "unexpected credential failure");
                    unexpected.get_or_insert(CrawlerError::Credentials { account, source });
                }
                Err(panic) => {
                    error!(account = %account, panic = %panic, "credential loading panicked");
                    unexpected.get_or_insert(CrawlerError::Credentials {
                        account,
                        source: panic.into(),
                    });
                }
            }
        }

        for index in collected.lost {
            let account = self.accounts[index].name().to_string();
            error!(account = %account, "credential worker stopped without a result");
            unexpected.get_or_insert(CrawlerError::Credentials {
                account,
                source: "credential worker stopped without a result".into(),
            });
        }

        if let Some(err) = auth_failure.or(unexpected) {
            return Err(err);
        }

        info!(
            elapsed_ms = self.timer.elapsed().map(|d| d.as_millis() as u64),
            "account credentials loaded"
        );
        Ok(())
    }

    /// Run `payload` once per (region, account) pair.
    ///
    /// Exactly one response is recorded per target, whether the payload
    /// returned, failed or panicked. The execution is added to history before
    /// the error policy is applied.
    pub async fn execute<P>(
        &mut self,
        payload: P,
        options: ExecuteOptions,
    ) -> Result<Arc<Execution<O::Account>>>
    where
        P: Payload<O::Account>,
    {
        let payload = Arc::new(payload);
        let targets = self.targets();
        let workers = options.pool_size(targets.len());

        let mut execution = Execution::new(payload.name());
        info!(
            payload = %execution.name(),
            targets = targets.len(),
            workers,
            "starting execution"
        );
        execution.timer.start();

        let mut pool = WorkerPool::new(workers);
        for target in &targets {
            pool.spawn(run_target(Arc::clone(&payload), target.clone()));
        }
        let collected = pool.collect().await;
        for response in collected.results {
            execution.push(response);
        }
        for index in collected.lost {
            let (region, account) = targets[index].clone().into_parts();
            let mut response = Response::new(region, account);
            response.set_failure(PayloadError::Lost);
            execution.push(response);
        }
        execution.timer.stop();

        let execution = Arc::new(execution);
        self.history.push(Arc::clone(&execution));

        info!(
            payload = %execution.name(),
            responses = execution.responses().len(),
            failed = execution.failure_count(),
            elapsed_ms = execution.timer().elapsed().map(|d| d.as_millis() as u64),
            "execution finished"
        );

        if execution.has_errors() {
            return handle_errors(execution, options.error_policy);
        }
        Ok(execution)
    }
}

/// One worker's job: run the payload against a target and record the outcome.
async fn run_target<P, A>(payload: Arc<P>, target: TaskTarget<A>) -> Response<A>
where
    P: Payload<A>,
    A: Account,
{
    let (region, account) = target.into_parts();
    let mut response = Response::new(region.clone(), Arc::clone(&account));
    response.timer.start();

    // Serialization runs user `Serialize` impls, so it stays inside the
    // panic boundary too.
    let outcome = catch_panic(async move {
        let output = payload.run(region, account).await?;
        serde_json::to_value(output).map_err(PayloadError::Output)
    })
    .await;

    match outcome {
        Ok(Ok(value)) => response.set_output(value),
        Ok(Err(err)) => response.set_failure(err),
        Err(panic) => response.set_failure(PayloadError::Panicked(panic)),
    }
    response.timer.stop();

    if let Some(failure) = response.failure() {
        debug!(
            account = %response.account().name(),
            region = %response.region(),
            error = %failure,
            "payload failed"
        );
    }
    response
}

fn handle_errors<A: Account>(
    execution: Arc<Execution<A>>,
    policy: ErrorPolicy,
) -> Result<Arc<Execution<A>>> {
    let Some(report) = execution.failure_report() else {
        return Ok(execution);
    };

    match policy {
        ErrorPolicy::Fail => {
            error!(
                payload = %execution.name(),
                failed = execution.failure_count(),
                "{report}"
            );
            Err(report)
        }
        ErrorPolicy::Collect => {
            warn!(
                payload = %execution.name(),
                failed = execution.failure_count(),
                "{report}"
            );
            Ok(execution)
        }
    }
}
