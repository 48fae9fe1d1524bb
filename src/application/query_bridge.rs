//! Translates synchronous-looking "get stock"/"get all stocks" requests
//! into asynchronous cell queries with per-call timeouts, using
//! ordinary request/reply plus `tokio::time::timeout`, with `ask_all`
//! expressed as a fan-out collector.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use crate::domain::errors::AppError;
use crate::domain::registry::Registry;
use crate::domain::stock::Stock;
use crate::domain::symbol::SymbolId;
use crate::infrastructure::observability::Metrics;

pub struct QueryBridge {
    registry: Arc<Registry>,
    timeout: Duration,
    metrics: Arc<Metrics>,
}

impl QueryBridge {
    pub fn new(registry: Arc<Registry>, timeout: Duration, metrics: Arc<Metrics>) -> Self {
        Self {
            registry,
            timeout,
            metrics,
        }
    }

    /// Looks up (creating if absent) the cell for `symbol` and returns
    /// its current value. Read-only and idempotent; never modifies
    /// state, and an unknown symbol yields a minimum-viable `Stock`
    /// rather than a not-found error.
    pub async fn ask_one(&self, symbol: &SymbolId) -> Result<Stock, AppError> {
        let handle = self.registry.get(symbol);
        match tokio::time::timeout(self.timeout, handle.read()).await {
            Ok(Ok(stock)) => Ok(stock),
            Ok(Err(_)) => Err(AppError::Internal("cell mailbox closed".into())),
            Err(_) => {
                self.metrics.inc_ask_timeout(symbol.as_str());
                Err(AppError::AskTimeout)
            }
        }
    }

    /// A snapshot-driven fan-out read of every registered cell. Per-cell
    /// isolation: a cell that times out is simply omitted from the
    /// result rather than failing the whole response.
    pub async fn ask_all(&self) -> Vec<Stock> {
        let handles = self.registry.all();
        let timeout = self.timeout;
        let metrics = self.metrics.clone();

        let reads = handles.into_iter().map(|handle| {
            let timeout = timeout;
            let metrics = metrics.clone();
            async move {
                let result = tokio::time::timeout(timeout, handle.read()).await;
                if result.is_err() {
                    metrics.inc_ask_timeout(handle.symbol().as_str());
                }
                result
            }
        });

        join_all(reads)
            .await
            .into_iter()
            .filter_map(|result| result.ok().and_then(|inner| inner.ok()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::observability::Metrics;
    use std::time::Duration;

    fn metrics() -> Arc<Metrics> {
        Arc::new(Metrics::new().unwrap())
    }

    #[tokio::test]
    async fn ask_one_unknown_symbol_returns_minimum_viable() {
        let registry = Arc::new(Registry::new());
        let bridge = QueryBridge::new(registry.clone(), Duration::from_secs(5), metrics());

        let stock = bridge
            .ask_one(&SymbolId::parse("ZZZZ").unwrap())
            .await
            .unwrap();

        assert_eq!(stock.symbol, "ZZZZ");
        assert!(stock.name.is_none());
        // the lazy lookup must have created a cell in the registry
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn ask_one_is_idempotent_absent_initialize() {
        let registry = Arc::new(Registry::new());
        let bridge = QueryBridge::new(registry, Duration::from_secs(5), metrics());
        let symbol = SymbolId::parse("ZZZZ").unwrap();

        let first = bridge.ask_one(&symbol).await.unwrap();
        let second = bridge.ask_one(&symbol).await.unwrap();

        assert_eq!(first.symbol, second.symbol);
    }

    #[tokio::test]
    async fn ask_all_returns_every_registered_cell() {
        let registry = Arc::new(Registry::new());
        registry.get(&SymbolId::parse("AAPL").unwrap());
        registry.get(&SymbolId::parse("MSFT").unwrap());
        let bridge = QueryBridge::new(registry, Duration::from_secs(5), metrics());

        let stocks = bridge.ask_all().await;
        assert_eq!(stocks.len(), 2);
    }

    #[tokio::test]
    async fn ask_all_on_empty_registry_returns_empty_vec() {
        let registry = Arc::new(Registry::new());
        let bridge = QueryBridge::new(registry, Duration::from_secs(5), metrics());

        assert!(bridge.ask_all().await.is_empty());
    }

    #[tokio::test]
    async fn ask_one_timeout_is_recorded_in_metrics() {
        let registry = Arc::new(Registry::new());
        let metrics = metrics();
        let bridge = QueryBridge::new(registry, Duration::from_nanos(1), metrics.clone());

        let result = bridge.ask_one(&SymbolId::parse("AAPL").unwrap()).await;

        assert!(matches!(result, Err(AppError::AskTimeout)));
        assert!(metrics.render().contains("stockcache_ask_timeouts_total"));
    }
}
