//! Maps [`AppError`] onto the `{code, message, timestamp, path}` error
//! body and an HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn from_app_error(error: AppError, path: impl Into<String>) -> Self {
        let status = match error {
            AppError::InvalidSymbol => StatusCode::BAD_REQUEST,
            AppError::AskTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            body: ErrorBody {
                code: error.code(),
                message: error.to_string(),
                timestamp: Utc::now(),
                path: path.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
