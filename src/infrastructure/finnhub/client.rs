//! The real `MarketClient`: Finnhub's symbol-list and profile
//! endpoints, fronted by the pooled/retrying HTTP client and a circuit
//! breaker around the profile call. Authenticates with the
//! `X-Finnhub-Token` header rather than a query parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

const TOKEN_HEADER: &str = "X-Finnhub-Token";

use crate::domain::ports::{ClientError, MarketClient};
use crate::domain::stock::{Profile, RawListing};
use crate::domain::symbol::SymbolId;
use crate::infrastructure::core::circuit_breaker::{CircuitBreaker, CircuitBreakerError};
use crate::infrastructure::core::http_client_factory::{build_url_with_query, HttpClientFactory};
use crate::infrastructure::finnhub::dto::{ListingDto, ProfileDto};

pub struct FinnhubMarketClient {
    http: ClientWithMiddleware,
    breaker: CircuitBreaker,
    base_url: String,
    api_key: String,
    exchange: String,
    mic: String,
}

impl FinnhubMarketClient {
    pub fn new(base_url: String, api_key: String, exchange: String, mic: String) -> Self {
        Self {
            http: HttpClientFactory::create_client(),
            breaker: CircuitBreaker::new(
                "finnhub-profile",
                5,
                2,
                Duration::from_secs(30),
            ),
            base_url,
            api_key,
            exchange,
            mic,
        }
    }

    fn request_error(err: reqwest_middleware::Error) -> ClientError {
        ClientError::Transport(err.to_string())
    }
}

#[async_trait]
impl MarketClient for FinnhubMarketClient {
    async fn list_symbols(&self) -> Result<Vec<RawListing>, ClientError> {
        let base = format!("{}/api/v1/stock/symbol", self.base_url);
        let url = build_url_with_query(
            &base,
            &[
                ("exchange", self.exchange.as_str()),
                ("mic", self.mic.as_str()),
            ],
        );
        debug!(url = %url, exchange = %self.exchange, "finnhub: fetching symbol list");

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BadStatus {
                status: status.as_u16(),
            });
        }

        let dtos: Vec<ListingDto> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(dtos.into_iter().map(RawListing::from).collect())
    }

    async fn fetch_profile(&self, symbol: &SymbolId) -> Result<Profile, ClientError> {
        let base = format!("{}/api/v1/stock/profile2", self.base_url);
        let symbol = symbol.as_str().to_string();
        let http = self.http.clone();
        let api_key = self.api_key.clone();

        let result = self
            .breaker
            .call(async move {
                let url = build_url_with_query(&base, &[("symbol", symbol.as_str())]);
                debug!(symbol = %symbol, "finnhub: fetching profile");
                let response = http
                    .get(&url)
                    .header(TOKEN_HEADER, &api_key)
                    .send()
                    .await
                    .map_err(Self::request_error)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(ClientError::BadStatus {
                        status: status.as_u16(),
                    });
                }

                let dto: ProfileDto = response
                    .json()
                    .await
                    .map_err(|e| ClientError::Decode(e.to_string()))?;

                Ok(Profile::from(dto))
            })
            .await;

        match result {
            Ok(profile) => Ok(profile),
            Err(CircuitBreakerError::Open(msg)) => Err(ClientError::Transport(msg)),
            Err(CircuitBreakerError::Inner(err)) => Err(err),
        }
    }
}
