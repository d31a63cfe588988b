//! Error types for quote fetching and analysis

use desk_llm::LLMError;
use thiserror::Error;

/// Stock desk errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Symbol rejected by the data provider
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// No price could be resolved for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Provider answered with a rate-limit or informational sentinel
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Required credential or setting missing
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Caller supplied unusable input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// AI gateway failure
    #[error("AI gateway error: {0}")]
    Llm(#[from] LLMError),

    /// Prompt template failure
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Coarse classification used for status codes and user messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credential or setting
    Configuration,
    /// Upstream throttling
    RateLimited,
    /// Upstream usage or billing limit
    QuotaExceeded,
    /// Nothing resolvable for a symbol
    NoData,
    /// Caller input rejected
    BadRequest,
    /// Any other upstream or internal failure
    Upstream,
}

impl StockError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::ConfigError(_) | StockError::Llm(LLMError::ConfigurationError(_)) => {
                ErrorKind::Configuration
            }
            StockError::RateLimitExceeded { .. } | StockError::Llm(LLMError::RateLimitExceeded(_)) => {
                ErrorKind::RateLimited
            }
            StockError::Llm(LLMError::QuotaExceeded(_)) => ErrorKind::QuotaExceeded,
            StockError::InvalidSymbol(_) | StockError::DataUnavailable { .. } => ErrorKind::NoData,
            StockError::InvalidRequest(_) => ErrorKind::BadRequest,
            _ => ErrorKind::Upstream,
        }
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            StockError::ConfigError(msg) => msg.clone(),
            StockError::Llm(LLMError::ConfigurationError(_)) => {
                "AI service not configured".to_string()
            }
            StockError::RateLimitExceeded { .. } => {
                "API rate limit reached. Please enter price manually.".to_string()
            }
            StockError::Llm(LLMError::RateLimitExceeded(_)) => {
                "Rate limit exceeded. Please try again in a moment.".to_string()
            }
            StockError::Llm(LLMError::QuotaExceeded(_)) => {
                "AI usage limit reached. Please add credits to continue.".to_string()
            }
            StockError::InvalidSymbol(symbol) | StockError::DataUnavailable { symbol, .. } => {
                format!("No data found for symbol: {symbol}")
            }
            StockError::InvalidRequest(msg) => msg.clone(),
            StockError::Llm(_) | StockError::Template(_) => {
                "Failed to analyze stock. Please try again.".to_string()
            }
            StockError::NetworkError(_)
            | StockError::JsonError(_)
            | StockError::AlphaVantageError(_) => "Failed to fetch stock data".to_string(),
        }
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;
