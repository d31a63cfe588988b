//! Submission flows tying quotes, analysis and state together

use super::forms::{SingleStockForm, can_compare};
use super::state::{DeskState, Notice};
use crate::analysis::AnalysisBackend;
use crate::api::QuoteSource;
use crate::batch::fetch_sequential;
use crate::config::DEFAULT_QUOTE_DELAY;
use crate::model::MultiRequest;
use std::time::Duration;
use tracing::{info, warn};

/// Desk controller over a quote source and an analysis backend
pub struct Desk<Q, A> {
    quotes: Q,
    analyst: A,
    quote_delay: Duration,
}

impl<Q, A> Desk<Q, A>
where
    Q: QuoteSource,
    A: AnalysisBackend,
{
    pub fn new(quotes: Q, analyst: A) -> Self {
        Self {
            quotes,
            analyst,
            quote_delay: DEFAULT_QUOTE_DELAY,
        }
    }

    pub fn with_quote_delay(mut self, delay: Duration) -> Self {
        self.quote_delay = delay;
        self
    }

    /// Analyze one stock, fetching its price unless one was entered
    pub async fn submit_single(&self, state: DeskState, form: SingleStockForm) -> DeskState {
        let (mut state, id) = state.begin();
        let symbol = form.symbol.clone();

        let price = match form.manual_price {
            Some(price) => price,
            None => match self.quotes.get_quote(&symbol).await {
                Ok(quote) => {
                    state = state.notify(
                        id,
                        Notice::info("Price fetched", format!("{symbol}: ${:.2}", quote.price)),
                    );
                    quote.price
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "price lookup failed");
                    return state.price_failed(id, e.user_message());
                }
            },
        };

        let request = form.into_request(price);
        match self.analyst.analyze_single(&request).await {
            Ok(normalized) => {
                let analysis = normalized.into_inner();
                info!(symbol = %symbol, signal = analysis.signal.as_str(), "analysis stored");
                let notice = Notice::info(
                    "Analysis Complete",
                    format!(
                        "{symbol}: {} ({}% confidence)",
                        analysis.signal.as_str(),
                        analysis.confidence
                    ),
                );
                state.notify(id, notice).finish_single(id, analysis)
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "analysis failed");
                state.fail(id, Notice::error("Analysis Failed", e.user_message()))
            }
        }
    }

    /// Fetch prices one by one, then rank whatever resolved
    pub async fn submit_comparison(&self, state: DeskState, symbols: &[String]) -> DeskState {
        let (mut state, id) = state.begin();

        if !can_compare(symbols) {
            return state.fail(
                id,
                Notice::error("Comparison Failed", "Enter at least two different symbols."),
            );
        }

        let batch = fetch_sequential(&self.quotes, symbols, self.quote_delay).await;

        if batch.is_total_failure() {
            return state.fail(
                id,
                Notice::error(
                    "Failed to fetch prices",
                    "Could not retrieve data for any symbols. API rate limit may be reached.",
                ),
            );
        }

        if batch.is_partial() {
            state = state.notify(
                id,
                Notice::info(
                    "Partial data retrieved",
                    format!("Could not fetch: {}", batch.failed.join(", ")),
                ),
            );
        }

        let request = MultiRequest {
            prices: batch.success.iter().map(|q| q.price_point()).collect(),
        };

        match self.analyst.compare(&request).await {
            Ok(normalized) => {
                let comparison = normalized.into_inner();
                let notice = Notice::info(
                    "Comparison Complete",
                    format!("{} stocks ranked by AI", request.prices.len()),
                );
                state.notify(id, notice).finish_comparison(id, comparison)
            }
            Err(e) => {
                warn!(error = %e, "comparison failed");
                state.fail(id, Notice::error("Comparison Failed", e.user_message()))
            }
        }
    }
}
