// src/crawler/history.rs

//! Bounded record of completed executions.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::crawler::execution::Execution;

pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Keeps the last `capacity` executions, oldest evicted first.
#[derive(Debug)]
pub struct ExecutionHistory<A> {
    entries: VecDeque<Arc<Execution<A>>>,
    capacity: usize,
}

impl<A> ExecutionHistory<A> {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, execution: Arc<Execution<A>>) {
        while self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(name = %evicted.name(), "evicting execution from history");
            }
        }
        self.entries.push_back(execution);
    }

    /// Most recent execution whose payload name is `name`.
    pub fn find(&self, name: &str) -> Option<Arc<Execution<A>>> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.name() == name)
            .cloned()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Execution<A>>> {
        self.entries.iter()
    }
}

impl<A> Default for ExecutionHistory<A> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
