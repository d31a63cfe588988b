//! Alpha Vantage GLOBAL_QUOTE client

use crate::api::QuoteSource;
use crate::error::{Result, StockError};
use crate::model::Quote;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

const PROVIDER: &str = "Alpha Vantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: Option<SharedRateLimiter>,
}

impl AlphaVantageClient {
    /// Create a client against the public endpoint with no client-side quota
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key; blank keys are rejected
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(StockError::ConfigError(
                "Stock data service not configured".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limiter: None,
        })
    }

    /// Point the client at another host (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Cap outgoing requests per minute; `0` leaves the client unthrottled
    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limiter = NonZeroU32::new(per_minute)
            .map(|n| Arc::new(RateLimiter::direct(Quota::per_minute(n))));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the latest quote for `symbol`
    #[instrument(skip(self), fields(provider = PROVIDER))]
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}/query", self.base_url);
        let params = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "quote request rejected");
            return Err(StockError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        debug!(body = %data, "quote response");

        parse_global_quote(symbol, &data)
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        AlphaVantageClient::get_quote(self, symbol).await
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

/// Turn a GLOBAL_QUOTE body into a [`Quote`]
///
/// Sentinel keys are checked before the payload: `Note` and `Information`
/// mean the key is throttled, `Error Message` means the symbol was rejected.
pub fn parse_global_quote(symbol: &str, data: &Value) -> Result<Quote> {
    if data.get("Note").is_some() || data.get("Information").is_some() {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    if data.get("Error Message").is_some() {
        return Err(StockError::InvalidSymbol(symbol.to_string()));
    }

    let unavailable = |reason: &str| StockError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: reason.to_string(),
    };

    let quote = data
        .get("Global Quote")
        .and_then(Value::as_object)
        .ok_or_else(|| unavailable("no Global Quote in response"))?;

    let price = quote
        .get("05. price")
        .and_then(number_field)
        .filter(|p| p.is_finite())
        .ok_or_else(|| unavailable("missing price"))?;

    let change = quote.get("09. change").and_then(number_field).unwrap_or(0.0);
    let change_percent = quote
        .get("10. change percent")
        .and_then(number_field)
        .unwrap_or(0.0);

    let resolved = quote
        .get("01. symbol")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(symbol);

    Ok(Quote::new(resolved, price).with_change(change, change_percent))
}

// Alpha Vantage sends every number as a string, percentages with a trailing '%'
fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
