//! The single collaborator boundary the core depends on: outbound HTTP
//! to the market-data provider. An `#[async_trait]` trait consumed
//! everywhere else as `Arc<dyn MarketClient>`, so tests and `Mode::Mock`
//! can swap in an in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::stock::{Profile, RawListing};
use crate::domain::symbol::SymbolId;

#[derive(Debug, Error, Clone)]
pub enum ClientError {
    #[error("provider returned status {status}")]
    BadStatus { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// A 4xx response: the request itself was malformed or unauthorized,
    /// so retrying it unchanged would fail again. Distinct from a 5xx or
    /// transport error, which may succeed on a later attempt.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ClientError::BadStatus { status } if (400..500).contains(status))
    }
}

#[async_trait]
pub trait MarketClient: Send + Sync {
    /// The configured universe (exchange/MIC are static per process).
    /// Eagerly materialized; no streaming semantics required.
    async fn list_symbols(&self) -> Result<Vec<RawListing>, ClientError>;

    /// The profile for one symbol. An empty-object response is valid
    /// and maps to a `Profile` with every field `None`.
    async fn fetch_profile(&self, symbol: &SymbolId) -> Result<Profile, ClientError>;
}
