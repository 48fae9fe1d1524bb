//! Client-facing error taxonomy: each variant is a stable, loggable
//! reason a request can fail for, independent of how it is eventually
//! rendered over HTTP.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("symbol failed validation")]
    InvalidSymbol,

    #[error("cell did not reply within the ask timeout")]
    AskTimeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code, per the `{code, message, ...}` error
    /// body contract.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidSymbol => "INVALID_STOCK_SYMBOL",
            AppError::AskTimeout => "ASK_TIMEOUT",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}
