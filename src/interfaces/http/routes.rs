//! Router construction and handlers for the stock-cache HTTP API:
//! per-symbol lookup, the full collection, and a health endpoint, with
//! request tracing via `tower_http`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::application::query_bridge::QueryBridge;
use crate::application::readiness::ReadinessReporter;
use crate::domain::symbol::SymbolId;
use crate::infrastructure::observability::Metrics;
use crate::interfaces::http::dto::StockDto;
use crate::interfaces::http::error::ApiError;

pub struct AppState {
    pub query_bridge: Arc<QueryBridge>,
    pub readiness: Arc<ReadinessReporter>,
    pub metrics: Arc<Metrics>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stocks/{symbol}", get(get_stock))
        .route("/stocks", get(get_stocks))
        .route("/health", get(get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(raw_symbol): Path<String>,
) -> Result<Json<StockDto>, ApiError> {
    let path = format!("/stocks/{raw_symbol}");

    let symbol =
        SymbolId::parse(&raw_symbol).map_err(|e| ApiError::from_app_error(e, path.clone()))?;

    let stock = state
        .query_bridge
        .ask_one(&symbol)
        .await
        .map_err(|e| ApiError::from_app_error(e, path.clone()))?;

    state.metrics.inc_http_request(&path, 200);
    Ok(Json(StockDto::from(stock)))
}

async fn get_stocks(State(state): State<Arc<AppState>>) -> Json<Vec<StockDto>> {
    let stocks = state.query_bridge.ask_all().await;
    state.metrics.inc_http_request("/stocks", 200);
    Json(stocks.into_iter().map(StockDto::from).collect())
}

async fn get_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report = state.readiness.report();
    state.metrics.inc_http_request("/health", 200);
    Json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::WarmupProgress;
    use crate::domain::registry::Registry;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let registry = Arc::new(Registry::new());
        let metrics = Arc::new(Metrics::new().expect("failed to build metrics"));
        let query_bridge = Arc::new(QueryBridge::new(
            registry,
            Duration::from_secs(1),
            metrics.clone(),
        ));
        let readiness = Arc::new(ReadinessReporter::new(Arc::new(WarmupProgress::new())));

        Arc::new(AppState {
            query_bridge,
            readiness,
            metrics,
        })
    }

    #[tokio::test]
    async fn unknown_symbol_returns_200_with_minimum_viable_stock() {
        let app = router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/stocks/ZZZZ")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["symbol"], "ZZZZ");
        assert!(json["name"].is_null());
    }

    #[tokio::test]
    async fn invalid_symbol_returns_400() {
        let app = router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/stocks/aa%24%24")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "INVALID_STOCK_SYMBOL");
    }

    #[tokio::test]
    async fn health_reports_starting_before_any_warmup() {
        let app = router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["state"], "starting");
    }

    #[tokio::test]
    async fn stocks_collection_reflects_registered_cells() {
        let state = test_state();
        let app = router(state.clone());

        let _ = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/stocks/AAPL")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/stocks")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
    }
}
