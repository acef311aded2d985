// src/crawler/pool.rs

//! Bounded fan-out of jobs onto the tokio runtime.
//!
//! Every job runs in its own Tokio task, but at most `size` of them hold a
//! permit at once. Results come back over an mpsc channel in completion
//! order; the caller drains them with [`WorkerPool::collect`]. A job whose
//! task ends without sending (it panicked outside [`catch_panic`]) is listed
//! by dispatch index in [`Collected::lost`].

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

pub struct WorkerPool<R> {
    size: usize,
    permits: Arc<Semaphore>,
    tx: mpsc::UnboundedSender<(usize, R)>,
    rx: mpsc::UnboundedReceiver<(usize, R)>,
    dispatched: usize,
}

/// Everything a pool produced.
#[derive(Debug)]
pub struct Collected<R> {
    /// Results in completion order.
    pub results: Vec<R>,
    /// Dispatch indices of jobs that never reported a result.
    pub lost: Vec<usize>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// `size` is clamped to at least one worker.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            size,
            permits: Arc::new(Semaphore::new(size)),
            tx,
            rx,
            dispatched: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a job. It starts as soon as a worker slot is free.
    ///
    /// Jobs are indexed in dispatch order, starting at zero.
    pub fn spawn<F>(&mut self, job: F)
    where
        F: Future<Output = R> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let tx = self.tx.clone();
        let index = self.dispatched;
        self.dispatched += 1;

        tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!(job = index, "worker pool closed before job started");
                    return;
                }
            };
            let result = job.await;
            if tx.send((index, result)).is_err() {
                debug!(job = index, "collector dropped before job finished");
            }
        });
    }

    /// Wait for every dispatched job.
    ///
    /// The channel closes once every job task has finished or unwound, so
    /// this never waits on a job that died.
    pub async fn collect(self) -> Collected<R> {
        let WorkerPool {
            tx,
            mut rx,
            dispatched,
            ..
        } = self;
        drop(tx);

        let mut reported = vec![false; dispatched];
        let mut results = Vec::with_capacity(dispatched);
        while let Some((index, result)) = rx.recv().await {
            reported[index] = true;
            results.push(result);
        }

        let lost: Vec<usize> = reported
            .iter()
            .enumerate()
            .filter(|(_, done)| !**done)
            .map(|(index, _)| index)
            .collect();
        if !lost.is_empty() {
            warn!(lost = lost.len(), dispatched, "jobs ended without a result");
        }

        Collected { results, lost }
    }
}

/// Run `fut` in its own task so a panic comes back as an error message
/// instead of tearing down the worker.
pub async fn catch_panic<F, T>(fut: F) -> Result<T, String>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(value) => Ok(value),
        Err(err) if err.is_panic() => Err(panic_message(err.into_panic())),
        Err(err) => Err(err.to_string()),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
