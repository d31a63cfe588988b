//! Sequential multi-symbol quote fetching
//!
//! Free-tier quote keys allow only a handful of calls per minute, so symbols
//! are fetched one at a time with a pause between calls.

use crate::api::QuoteSource;
use crate::model::Quote;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a multi-symbol fetch, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchQuotes {
    pub success: Vec<Quote>,
    pub failed: Vec<String>,
}

impl BatchQuotes {
    /// Nothing resolved; callers must not continue to analysis
    pub fn is_total_failure(&self) -> bool {
        self.success.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.success.is_empty() && !self.failed.is_empty()
    }
}

/// Fetch `symbols` strictly one after another
///
/// Sleeps `delay` before every call except the first. A failing symbol is
/// recorded in `failed` and the loop carries on. Duplicates are fetched again.
pub async fn fetch_sequential<Q>(source: &Q, symbols: &[String], delay: Duration) -> BatchQuotes
where
    Q: QuoteSource + ?Sized,
{
    let mut batch = BatchQuotes::default();

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            debug!(?delay, "waiting before next quote request");
            tokio::time::sleep(delay).await;
        }

        match source.get_quote(symbol).await {
            Ok(quote) => batch.success.push(quote),
            Err(e) => {
                warn!(symbol = %symbol, provider = source.name(), error = %e, "quote fetch failed");
                batch.failed.push(symbol.clone());
            }
        }
    }

    info!(
        fetched = batch.success.len(),
        failed = batch.failed.len(),
        "batch quote fetch finished"
    );
    batch
}
