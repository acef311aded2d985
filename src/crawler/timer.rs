// src/crawler/timer.rs

//! Wall-clock timing for a unit of work.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

/// Measures how long something took.
///
/// `Idle -> Running -> Stopped`. `start` may be called again from any state
/// and begins a fresh measurement. `stop` does nothing unless the timer is
/// running. A timer belongs to exactly one response, execution or crawler.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    start: Option<Instant>,
    end: Option<Instant>,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
}

/// Serializable view of a [`Timer`]. Stamps are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerRecord {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub elapsed_time: Option<f64>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        match (self.start, self.end) {
            (None, _) => TimerState::Idle,
            (Some(_), None) => TimerState::Running,
            (Some(_), Some(_)) => TimerState::Stopped,
        }
    }

    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.started_at = Some(SystemTime::now());
        self.end = None;
        self.ended_at = None;
    }

    pub fn stop(&mut self) {
        if self.state() == TimerState::Running {
            self.end = Some(Instant::now());
            self.ended_at = Some(SystemTime::now());
        }
    }

    /// Defined once the timer has been started and stopped.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    pub fn dump(&self) -> TimerRecord {
        TimerRecord {
            start_time: self.started_at.and_then(epoch_secs),
            end_time: self.ended_at.and_then(epoch_secs),
            elapsed_time: self.elapsed().map(|d| d.as_secs_f64()),
        }
    }
}

fn epoch_secs(t: SystemTime) -> Option<f64> {
    t.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs_f64())
}
