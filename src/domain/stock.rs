//! The enrichment data model: [`RawListing`] + [`Profile`] -> [`Stock`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::symbol::canonicalize;

/// One element of `MarketClient::list_symbols`. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub currency: Option<String>,
    pub description: Option<String>,
    pub display_symbol: Option<String>,
    pub figi: Option<String>,
    pub mic: Option<String>,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The company-profile response. Every field may be absent; an
/// empty-object response is a valid, all-`None` profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub ipo: Option<String>,
    pub market_capitalization: Option<f64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
    pub logo: Option<String>,
    pub industry: Option<String>,
}

/// The enriched record stored in a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub asset_type: Option<String>,
    pub ipo_date: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub ipo: Option<String>,
    pub market_capitalization: Option<f64>,
    pub phone: Option<String>,
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
    pub logo: Option<String>,
    pub industry: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl Stock {
    /// Pure assembly of a listing and a profile into an enriched record.
    /// No I/O; `now` is passed in so callers control the timestamp source.
    pub fn combine(listing: &RawListing, profile: &Profile, now: DateTime<Utc>) -> Self {
        Self {
            symbol: canonicalize(&listing.symbol),
            name: profile.name.clone(),
            exchange: profile.exchange.clone().or_else(|| listing.mic.clone()),
            asset_type: listing.kind.clone(),
            ipo_date: profile.ipo.clone(),
            country: profile.country.clone(),
            currency: profile
                .currency
                .clone()
                .or_else(|| listing.currency.clone()),
            ipo: profile.ipo.clone(),
            market_capitalization: profile.market_capitalization,
            phone: profile.phone.clone(),
            share_outstanding: profile.share_outstanding,
            ticker: profile.ticker.clone().or_else(|| Some(listing.symbol.clone())),
            weburl: profile.weburl.clone(),
            logo: profile.logo.clone(),
            industry: profile.industry.clone(),
            last_updated: now,
        }
    }

    /// The availability fallback for a cell that has never been
    /// initialized: symbol only, timestamped now.
    pub fn minimum_viable(symbol: &str, now: DateTime<Utc>) -> Self {
        Self {
            symbol: canonicalize(symbol),
            name: None,
            exchange: None,
            asset_type: None,
            ipo_date: None,
            country: None,
            currency: None,
            ipo: None,
            market_capitalization: None,
            phone: None,
            share_outstanding: None,
            ticker: None,
            weburl: None,
            logo: None,
            industry: None,
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(symbol: &str) -> RawListing {
        RawListing {
            currency: Some("USD".into()),
            description: Some("APPLE INC".into()),
            display_symbol: Some(symbol.into()),
            figi: Some("BBG000B9XRY4".into()),
            mic: Some("XNYS".into()),
            symbol: symbol.into(),
            kind: Some("Common Stock".into()),
        }
    }

    #[test]
    fn combine_assembles_from_listing_and_profile() {
        let profile = Profile {
            name: Some("Apple Inc.".into()),
            country: Some("US".into()),
            ..Default::default()
        };
        let now = Utc::now();
        let stock = Stock::combine(&listing("aapl"), &profile, now);

        assert_eq!(stock.symbol, "AAPL");
        assert_eq!(stock.name.as_deref(), Some("Apple Inc."));
        assert_eq!(stock.last_updated, now);
    }

    #[test]
    fn combine_tolerates_empty_profile() {
        let now = Utc::now();
        let stock = Stock::combine(&listing("MSFT"), &Profile::default(), now);
        assert_eq!(stock.symbol, "MSFT");
        assert!(stock.name.is_none());
        assert_eq!(stock.exchange.as_deref(), Some("XNYS"));
    }

    #[test]
    fn minimum_viable_has_symbol_and_timestamp_only() {
        let now = Utc::now();
        let stock = Stock::minimum_viable("zzzz", now);
        assert_eq!(stock.symbol, "ZZZZ");
        assert!(stock.name.is_none());
        assert_eq!(stock.last_updated, now);
    }
}
