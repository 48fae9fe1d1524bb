//! The background warm-up pipeline: one-shot, rate-limited,
//! bounded-concurrency enrichment that populates cells without blocking
//! process readiness. A `tokio::sync::Semaphore` bounds concurrency and
//! a `tokio::task::JoinSet` drives the fan-out over the full symbol
//! list returned by `list_symbols`.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::ports::MarketClient;
use crate::domain::progress::WarmupProgress;
use crate::domain::registry::Registry;
use crate::domain::symbol::SymbolId;
use crate::infrastructure::core::rate_limiter::PermitLimiter;
use crate::infrastructure::observability::Metrics;

pub struct WarmupPipeline {
    market_client: Arc<dyn MarketClient>,
    registry: Arc<Registry>,
    progress: Arc<WarmupProgress>,
    metrics: Arc<Metrics>,
    rate_limit_per_sec: f64,
    max_parallel_fetches: usize,
}

impl WarmupPipeline {
    pub fn new(
        market_client: Arc<dyn MarketClient>,
        registry: Arc<Registry>,
        progress: Arc<WarmupProgress>,
        metrics: Arc<Metrics>,
        rate_limit_per_sec: f64,
        max_parallel_fetches: usize,
    ) -> Self {
        Self {
            market_client,
            registry,
            progress,
            metrics,
            rate_limit_per_sec,
            max_parallel_fetches,
        }
    }

    /// Run the one-shot warm-up to completion. Intended to be spawned
    /// as a background task right after the "application ready" signal;
    /// never awaited by the request path.
    pub async fn run(&self) {
        let started_at = Instant::now();
        self.progress.mark_started();
        info!("warm-up: starting");

        let listings = match self.market_client.list_symbols().await {
            Ok(listings) => listings,
            Err(err) => {
                error!(error = %err, "warm-up: list_symbols failed, exiting warm-up");
                self.progress.mark_completed();
                self.metrics
                    .observe_warmup_duration("list_failed", started_at.elapsed().as_secs_f64());
                return;
            }
        };

        self.progress.set_total(listings.len());
        self.metrics.warmup_progress_total.set(listings.len() as f64);
        info!(total = listings.len(), "warm-up: universe loaded");

        if listings.is_empty() {
            self.progress.mark_completed();
            self.metrics
                .observe_warmup_duration("empty", started_at.elapsed().as_secs_f64());
            info!("warm-up: empty universe, completed immediately");
            return;
        }

        let limiter = Arc::new(PermitLimiter::new(self.rate_limit_per_sec));
        let semaphore = Arc::new(Semaphore::new(self.max_parallel_fetches.max(1)));
        let mut tasks = JoinSet::new();

        for listing in listings {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore never closed during warm-up");
            let limiter = limiter.clone();
            let client = self.market_client.clone();
            let registry = self.registry.clone();
            let progress = self.progress.clone();
            let metrics = self.metrics.clone();

            tasks.spawn(async move {
                let _permit = permit;
                limiter.acquire().await;

                let raw_symbol = listing.symbol.clone();
                let symbol = match SymbolId::parse(&raw_symbol) {
                    Ok(symbol) => symbol,
                    Err(_) => {
                        warn!(symbol = %raw_symbol, "warm-up: skipping listing with invalid symbol");
                        progress.increment_processed();
                        metrics.warmup_progress_processed.inc();
                        return;
                    }
                };

                match client.fetch_profile(&symbol).await {
                    Ok(profile) => {
                        let handle = registry.get(&symbol);
                        handle.initialize(listing, profile).await;
                    }
                    Err(err) if err.is_client_fault() => {
                        warn!(symbol = %symbol, error = %err, "warm-up: profile fetch rejected by provider, skipping (not retryable)");
                    }
                    Err(err) => {
                        warn!(symbol = %symbol, error = %err, "warm-up: profile fetch failed, skipping");
                    }
                }
                progress.increment_processed();
                metrics.warmup_progress_processed.inc();
            });
        }

        while tasks.join_next().await.is_some() {}

        self.progress.mark_completed();
        let snap = self.progress.snapshot();
        self.metrics.observe_warmup_duration(
            if snap.processed >= snap.total { "completed" } else { "degraded" },
            started_at.elapsed().as_secs_f64(),
        );
        info!(
            total = snap.total,
            processed = snap.processed,
            "warm-up: completed"
        );
    }
}
