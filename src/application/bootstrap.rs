//! Constructor wiring: assemble the collaborators in dependency order,
//! then hand back a slim handle the HTTP layer depends on.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::application::query_bridge::QueryBridge;
use crate::application::readiness::ReadinessReporter;
use crate::application::warmup::WarmupPipeline;
use crate::config::{Config, Mode};
use crate::domain::ports::MarketClient;
use crate::domain::progress::WarmupProgress;
use crate::domain::registry::Registry;
use crate::infrastructure::observability::Metrics;
use crate::infrastructure::{FinnhubMarketClient, MockMarketClient};

/// Everything the HTTP layer (and any future consumer) needs once the
/// application has been built and started. Cheap to clone-by-field;
/// every member is already an `Arc`.
pub struct ApplicationHandle {
    pub query_bridge: Arc<QueryBridge>,
    pub readiness: Arc<ReadinessReporter>,
    pub metrics: Arc<Metrics>,
}

pub struct Application {
    config: Config,
    market_client: Arc<dyn MarketClient>,
    registry: Arc<Registry>,
    progress: Arc<WarmupProgress>,
    metrics: Arc<Metrics>,
}

impl Application {
    /// Assemble the collaborator graph. Does not start the warm-up
    /// pipeline — that happens in `start`.
    pub async fn build(config: Config) -> Result<Self> {
        info!(mode = ?config.mode, "building application");

        let market_client: Arc<dyn MarketClient> = match config.mode {
            Mode::Mock => Arc::new(MockMarketClient::new()),
            Mode::Finnhub => Arc::new(FinnhubMarketClient::new(
                config.base_url.clone(),
                config.api_key.clone(),
                config.exchange.clone(),
                config.mic.clone(),
            )),
        };

        let registry = Arc::new(Registry::new());
        let progress = Arc::new(WarmupProgress::new());
        let metrics = Arc::new(Metrics::new()?);

        Ok(Self {
            config,
            market_client,
            registry,
            progress,
            metrics,
        })
    }

    /// Spawn the background warm-up pipeline and return the handle the
    /// HTTP server's `AppState` is built from. The warm-up pipeline runs
    /// detached: readiness is observed through `WarmupProgress`, never
    /// by awaiting this spawn.
    pub fn start(self) -> ApplicationHandle {
        info!("starting warm-up pipeline");

        let pipeline = WarmupPipeline::new(
            self.market_client.clone(),
            self.registry.clone(),
            self.progress.clone(),
            self.metrics.clone(),
            self.config.rate_limit,
            self.config.max_parallel_fetches,
        );
        tokio::spawn(async move { pipeline.run().await });

        let query_bridge = Arc::new(QueryBridge::new(
            self.registry,
            self.config.ask_timeout,
            self.metrics.clone(),
        ));
        let readiness = Arc::new(ReadinessReporter::new(self.progress));

        ApplicationHandle {
            query_bridge,
            readiness,
            metrics: self.metrics,
        }
    }
}
