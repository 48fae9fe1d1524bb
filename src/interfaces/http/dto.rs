//! The outbound JSON shape for `Stock`, field-renamed to the
//! lowerCamelCase contract. Kept as a distinct type from the domain
//! `Stock` so a later wire-format change never forces a domain edit.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::stock::Stock;

#[derive(Debug, Serialize)]
pub struct StockDto {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    #[serde(rename = "assetType")]
    pub asset_type: Option<String>,
    #[serde(rename = "ipoDate")]
    pub ipo_date: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub ipo: Option<String>,
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: Option<f64>,
    pub phone: Option<String>,
    #[serde(rename = "shareOutstanding")]
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    pub industry: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

impl From<Stock> for StockDto {
    fn from(stock: Stock) -> Self {
        Self {
            symbol: stock.symbol,
            name: stock.name,
            exchange: stock.exchange,
            asset_type: stock.asset_type,
            ipo_date: stock.ipo_date,
            country: stock.country,
            currency: stock.currency,
            ipo: stock.ipo,
            market_capitalization: stock.market_capitalization,
            phone: stock.phone,
            share_outstanding: stock.share_outstanding,
            ticker: stock.ticker,
            weburl: stock.weburl,
            logo: stock.logo,
            industry: stock.industry,
            last_updated: stock.last_updated,
        }
    }
}
