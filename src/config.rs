//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Finnhub,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "finnhub" => Ok(Mode::Finnhub),
            _ => anyhow::bail!("invalid MODE: {s}. Must be 'mock' or 'finnhub'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub api_key: String,
    pub base_url: String,
    pub exchange: String,
    pub mic: String,
    pub rate_limit: f64,
    pub max_parallel_fetches: usize,
    pub ask_timeout: Duration,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "mock".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let api_key = env::var("API_KEY").unwrap_or_default();
        if mode == Mode::Finnhub && api_key.is_empty() {
            anyhow::bail!("API_KEY is required when MODE=finnhub");
        }

        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "https://finnhub.io".to_string());
        let exchange = env::var("EXCHANGE").unwrap_or_else(|_| "US".to_string());
        let mic = env::var("MIC").unwrap_or_else(|_| "XNYS".to_string());

        let rate_limit = env::var("RATE_LIMIT")
            .unwrap_or_else(|_| "1.0".to_string())
            .parse::<f64>()
            .context("failed to parse RATE_LIMIT")?;

        let max_parallel_fetches = env::var("MAX_PARALLEL_FETCHES")
            .unwrap_or_else(|_| "8".to_string())
            .parse::<usize>()
            .context("failed to parse MAX_PARALLEL_FETCHES")?;

        let ask_timeout_secs = env::var("ASK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("failed to parse ASK_TIMEOUT_SECS")?;

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("failed to parse HTTP_PORT")?;

        Ok(Config {
            mode,
            api_key,
            base_url,
            exchange,
            mic,
            rate_limit,
            max_parallel_fetches,
            ask_timeout: Duration::from_secs(ask_timeout_secs),
            http_port,
        })
    }
}
