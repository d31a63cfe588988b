use crate::error::{ErrorKind, StockError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - unusable input
    BadRequest(String),

    /// 402 - AI usage limit reached
    QuotaExceeded(String),

    /// 429 - AI gateway throttling
    RateLimited(String),

    /// 500 - a required credential is missing
    NotConfigured(String),

    /// 500 - anything else
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::QuotaExceeded(_) => StatusCode::PAYMENT_REQUIRED,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotConfigured(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (ApiError::BadRequest(error)
        | ApiError::QuotaExceeded(error)
        | ApiError::RateLimited(error)
        | ApiError::NotConfigured(error)
        | ApiError::Internal(error)) = self;

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        match err.kind() {
            ErrorKind::Configuration => ApiError::NotConfigured(err.user_message()),
            ErrorKind::RateLimited => ApiError::RateLimited(err.user_message()),
            ErrorKind::QuotaExceeded => ApiError::QuotaExceeded(err.user_message()),
            ErrorKind::BadRequest => ApiError::BadRequest(err.user_message()),
            ErrorKind::NoData | ErrorKind::Upstream => {
                tracing::error!(error = %err, "request failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

// Malformed bodies answer with the same JSON shape as every other error
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
