//! API clients for stock data providers

pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageClient;

use crate::error::Result;
use crate::model::Quote;
use async_trait::async_trait;

/// Anything that can resolve the latest quote for a symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: QuoteSource + ?Sized> QuoteSource for Box<T> {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        (**self).get_quote(symbol).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
