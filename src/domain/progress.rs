//! Process-wide warm-up counters: a small struct of atomic fields,
//! constructed once at startup and shared by reference between the
//! warm-up pipeline (sole writer) and the readiness reporter (reader).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct WarmupProgress {
    started: AtomicBool,
    completed: AtomicBool,
    total: AtomicUsize,
    processed: AtomicUsize,
}

/// A consistent-enough read of the four counters for a single
/// observation. Individual fields may be slightly stale relative to one
/// another; the monotonicity invariants still hold across observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub started: bool,
    pub completed: bool,
    pub total: usize,
    pub processed: usize,
}

impl WarmupProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_started(&self) {
        self.started.store(true, Ordering::SeqCst);
    }

    /// Set exactly once, before any `increment_processed` call.
    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    pub fn increment_processed(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn mark_completed(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            started: self.started.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            total: self.total.load(Ordering::SeqCst),
            processed: self.processed.load(Ordering::SeqCst),
        }
    }
}
