//! Exposes `WarmupProgress` as a four-state health indicator. Read-only
//! and lock-free-safe: a stale read that sees slightly inconsistent
//! counters is acceptable.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::progress::WarmupProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessState {
    Starting,
    Warming,
    Degraded,
    Ready,
}

impl ReadinessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessState::Starting => "starting",
            ReadinessState::Warming => "warming",
            ReadinessState::Degraded => "degraded",
            ReadinessState::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReadinessReport {
    pub state: ReadinessState,
    pub total: usize,
    pub processed: usize,
    pub percent: u64,
}

pub struct ReadinessReporter {
    progress: Arc<WarmupProgress>,
}

impl ReadinessReporter {
    pub fn new(progress: Arc<WarmupProgress>) -> Self {
        Self { progress }
    }

    pub fn report(&self) -> ReadinessReport {
        let snap = self.progress.snapshot();

        let state = if !snap.started {
            ReadinessState::Starting
        } else if !snap.completed {
            ReadinessState::Warming
        } else if snap.processed >= snap.total {
            ReadinessState::Ready
        } else {
            ReadinessState::Degraded
        };

        let percent = (snap.processed as u64 * 100) / snap.total.max(1) as u64;

        ReadinessReport {
            state,
            total: snap.total,
            processed: snap.processed,
            percent,
        }
    }
}
