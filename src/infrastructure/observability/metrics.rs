//! Prometheus metrics definitions for this service, all under the
//! `stockcache_` prefix.

use prometheus::{
    core::{AtomicF64, GenericGauge},
    CounterVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Size of the configured universe, set once warm-up loads it.
    pub warmup_progress_total: GenericGauge<AtomicF64>,
    /// Symbols processed so far (success or skip both count).
    pub warmup_progress_processed: GenericGauge<AtomicF64>,
    /// Wall-clock duration of a completed warm-up run.
    pub warmup_duration_seconds: HistogramVec,
    /// `ask_one`/`ask_all` timeouts against a cell.
    pub ask_timeouts_total: CounterVec,
    /// Inbound HTTP requests by path and status.
    pub http_requests_total: CounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let warmup_progress_total = GenericGauge::with_opts(Opts::new(
            "stockcache_warmup_progress_total",
            "Size of the configured symbol universe",
        ))?;
        registry.register(Box::new(warmup_progress_total.clone()))?;

        let warmup_progress_processed = GenericGauge::with_opts(Opts::new(
            "stockcache_warmup_progress_processed",
            "Symbols processed so far during warm-up",
        ))?;
        registry.register(Box::new(warmup_progress_processed.clone()))?;

        let warmup_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "stockcache_warmup_duration_seconds",
                "Duration of a completed warm-up run",
            )
            .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(warmup_duration_seconds.clone()))?;

        let ask_timeouts_total = CounterVec::new(
            Opts::new(
                "stockcache_ask_timeouts_total",
                "Total ask_one/ask_all timeouts against a cell",
            ),
            &["symbol"],
        )?;
        registry.register(Box::new(ask_timeouts_total.clone()))?;

        let http_requests_total = CounterVec::new(
            Opts::new("stockcache_http_requests_total", "Inbound HTTP requests"),
            &["path", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            warmup_progress_total,
            warmup_progress_processed,
            warmup_duration_seconds,
            ask_timeouts_total,
            http_requests_total,
        })
    }

    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn observe_warmup_duration(&self, outcome: &str, seconds: f64) {
        self.warmup_duration_seconds
            .with_label_values(&[outcome])
            .observe(seconds);
    }

    pub fn inc_ask_timeout(&self, symbol: &str) {
        self.ask_timeouts_total.with_label_values(&[symbol]).inc();
    }

    pub fn inc_http_request(&self, path: &str, status: u16) {
        self.http_requests_total
            .with_label_values(&[path, &status.to_string()])
            .inc();
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("failed to construct default Metrics")
    }
}
