//! An in-memory `MarketClient` for `Mode::Mock` and for tests: fixed
//! canned data instead of a live feed.

use async_trait::async_trait;

use crate::domain::ports::{ClientError, MarketClient};
use crate::domain::stock::{Profile, RawListing};
use crate::domain::symbol::SymbolId;

/// A small, fixed universe of well-known symbols, enough to exercise
/// the warm-up pipeline and HTTP surface end to end without a Finnhub
/// API key.
pub struct MockMarketClient {
    listings: Vec<RawListing>,
}

impl MockMarketClient {
    pub fn new() -> Self {
        let sample = [
            ("AAPL", "Apple Inc.", "Technology"),
            ("MSFT", "Microsoft Corporation", "Technology"),
            ("GOOGL", "Alphabet Inc.", "Technology"),
            ("AMZN", "Amazon.com, Inc.", "Consumer Cyclical"),
            ("TSLA", "Tesla, Inc.", "Consumer Cyclical"),
        ];

        let listings = sample
            .iter()
            .map(|(symbol, _, _)| RawListing {
                currency: Some("USD".to_string()),
                description: Some(symbol.to_string()),
                display_symbol: Some(symbol.to_string()),
                figi: None,
                mic: Some("XNYS".to_string()),
                symbol: symbol.to_string(),
                kind: Some("Common Stock".to_string()),
            })
            .collect();

        Self { listings }
    }

    fn profile_for(symbol: &str) -> Profile {
        let sample = [
            ("AAPL", "Apple Inc.", "Technology"),
            ("MSFT", "Microsoft Corporation", "Technology"),
            ("GOOGL", "Alphabet Inc.", "Technology"),
            ("AMZN", "Amazon.com, Inc.", "Consumer Cyclical"),
            ("TSLA", "Tesla, Inc.", "Consumer Cyclical"),
        ];

        let found = sample.iter().find(|(sym, _, _)| *sym == symbol);
        Profile {
            country: Some("US".to_string()),
            currency: Some("USD".to_string()),
            exchange: Some("XNYS".to_string()),
            ipo: Some("1990-01-01".to_string()),
            market_capitalization: Some(1_000_000.0),
            name: found.map(|(_, name, _)| name.to_string()),
            phone: None,
            share_outstanding: Some(1_000.0),
            ticker: Some(symbol.to_string()),
            weburl: None,
            logo: None,
            industry: found.map(|(_, _, industry)| industry.to_string()),
        }
    }
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketClient for MockMarketClient {
    async fn list_symbols(&self) -> Result<Vec<RawListing>, ClientError> {
        Ok(self.listings.clone())
    }

    async fn fetch_profile(&self, symbol: &SymbolId) -> Result<Profile, ClientError> {
        Ok(Self::profile_for(symbol.as_str()))
    }
}
