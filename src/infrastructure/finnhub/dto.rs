//! Wire shapes for Finnhub's symbol-list and profile endpoints.

use serde::Deserialize;

use crate::domain::stock::{Profile, RawListing};

#[derive(Debug, Deserialize)]
pub struct ListingDto {
    pub currency: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "displaySymbol")]
    pub display_symbol: Option<String>,
    pub figi: Option<String>,
    pub mic: Option<String>,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<ListingDto> for RawListing {
    fn from(dto: ListingDto) -> Self {
        RawListing {
            currency: dto.currency,
            description: dto.description,
            display_symbol: dto.display_symbol,
            figi: dto.figi,
            mic: dto.mic,
            symbol: dto.symbol,
            kind: dto.kind,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileDto {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub ipo: Option<String>,
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: Option<f64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "shareOutstanding")]
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    pub industry: Option<String>,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        Profile {
            country: dto.country,
            currency: dto.currency,
            exchange: dto.exchange,
            ipo: dto.ipo,
            market_capitalization: dto.market_capitalization,
            name: dto.name,
            phone: dto.phone,
            share_outstanding: dto.share_outstanding,
            ticker: dto.ticker,
            weburl: dto.weburl,
            logo: dto.logo,
            industry: dto.industry,
        }
    }
}
