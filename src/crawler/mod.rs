// src/crawler/mod.rs

//! Multi-account, multi-region payload execution.
//!
//! - [`executor`] owns the [`Crawler`] itself.
//! - [`selection`] turns account/region selectors into validated sets.
//! - [`target`] expands regions x accounts into [`TaskTarget`]s.
//! - [`pool`] is the bounded worker pool jobs run on.
//! - [`execution`] holds the per-target [`Response`]s and their aggregate.
//! - [`history`] keeps a bounded record of past executions.
//! - [`payload`] defines what a crawler runs.
//! - [`timer`] measures everything above.

pub mod execution;
pub mod executor;
pub mod history;
pub mod payload;
pub mod pool;
pub mod selection;
pub mod target;
pub mod timer;

pub use execution::{Execution, ExecutionRecord, PayloadError, Response, ResponseRecord};
pub use executor::{Crawler, CrawlerOptions, DEFAULT_MAX_WORKERS, ExecuteOptions};
pub use history::{DEFAULT_HISTORY_CAPACITY, ExecutionHistory};
pub use payload::{FnPayload, Payload};
pub use selection::{AccountSelector, RegionSelector};
pub use target::{TaskTarget, cross_product};
pub use timer::{Timer, TimerRecord, TimerState};
