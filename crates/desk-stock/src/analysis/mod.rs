//! AI-backed stock analysis
//!
//! [`Analyst`] builds the prompts, sends one chat completion per request and
//! hands the reply to [`normalize`].

pub mod normalize;

pub use normalize::{Normalized, extract_json_object, normalize_comparison, normalize_single};

use crate::error::Result;
use crate::model::{AnalysisRequest, ComparisonAnalysis, MultiRequest, SingleAnalysis, SingleRequest};
use crate::prompts::{PromptSet, system};
use async_trait::async_trait;
use desk_llm::{CompletionRequest, LLMProvider, Message};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Something that turns analysis requests into normalized results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze_single(&self, request: &SingleRequest) -> Result<Normalized<SingleAnalysis>>;

    async fn compare(&self, request: &MultiRequest) -> Result<Normalized<ComparisonAnalysis>>;
}

/// Result of either analysis mode, serialized as the bare result object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Single(Normalized<SingleAnalysis>),
    Multi(Normalized<ComparisonAnalysis>),
}

impl AnalysisOutcome {
    pub fn is_degraded(&self) -> bool {
        match self {
            AnalysisOutcome::Single(n) => n.is_degraded(),
            AnalysisOutcome::Multi(n) => n.is_degraded(),
        }
    }
}

/// Dispatch on the request type
pub async fn run<B>(backend: &B, request: &AnalysisRequest) -> Result<AnalysisOutcome>
where
    B: AnalysisBackend + ?Sized,
{
    match request {
        AnalysisRequest::Single(single) => {
            backend.analyze_single(single).await.map(AnalysisOutcome::Single)
        }
        AnalysisRequest::Multi(multi) => backend.compare(multi).await.map(AnalysisOutcome::Multi),
    }
}

/// Sends analysis prompts to a chat-completion provider
pub struct Analyst {
    provider: Arc<dyn LLMProvider>,
    model: String,
    prompts: PromptSet,
}

impl Analyst {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            provider,
            model: model.into(),
            prompts: PromptSet::new()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_prompt: String) -> Result<String> {
        let request = CompletionRequest::builder(&self.model)
            .system(system_prompt)
            .add_message(Message::user(user_prompt))
            .build();

        let response = self.provider.complete(request).await?;
        debug!(
            provider = self.provider.name(),
            tokens = response.usage.total(),
            "completion received"
        );
        Ok(response.message.content)
    }
}

#[async_trait]
impl AnalysisBackend for Analyst {
    #[instrument(skip(self, request), fields(symbol = %request.symbol, model = %self.model))]
    async fn analyze_single(&self, request: &SingleRequest) -> Result<Normalized<SingleAnalysis>> {
        request.validate()?;
        let prompt = self.prompts.single_analysis(request)?;
        let raw = self.complete(system::SINGLE_ANALYSIS, prompt).await?;

        let normalized = normalize_single(&raw, request);
        info!(
            signal = normalized.get().signal.as_str(),
            confidence = normalized.get().confidence,
            degraded = normalized.is_degraded(),
            "single analysis complete"
        );
        Ok(normalized)
    }

    #[instrument(skip(self, request), fields(stocks = request.prices.len(), model = %self.model))]
    async fn compare(&self, request: &MultiRequest) -> Result<Normalized<ComparisonAnalysis>> {
        request.validate()?;
        let prompt = self.prompts.comparison(request)?;
        let raw = self.complete(system::COMPARISON, prompt).await?;

        let normalized = normalize_comparison(&raw, &request.prices);
        info!(
            rankings = normalized.get().rankings.len(),
            leader = normalized.get().ranked_first().map(|r| r.symbol.as_str()),
            degraded = normalized.is_degraded(),
            "comparison complete"
        );
        Ok(normalized)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use desk_llm::{
        CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason,
        TokenUsage,
    };
    use std::sync::Mutex;

    /// Provider that answers every request with a canned reply and records requests
    pub struct ScriptedProvider {
        reply: std::result::Result<String, fn() -> LLMError>,
        pub seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(make: fn() -> LLMError) -> Self {
            Self {
                reply: Err(make),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> desk_llm::Result<CompletionResponse> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    message: Message::assistant(text.clone()),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                }),
                Err(make) => Err(make()),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedProvider;
    use super::*;
    use crate::error::{ErrorKind, StockError};
    use crate::model::{PricePoint, RiskProfile, Signal, Timeframe};
    use desk_llm::{LLMError, Role};

    fn single() -> SingleRequest {
        SingleRequest::new("NVDA", 120.5, Timeframe::Intraday, RiskProfile::Aggressive)
    }

    #[tokio::test]
    async fn test_single_request_shape() {
        let provider = Arc::new(ScriptedProvider::replying(
            r#"{"signal":"BUY","confidence":91}"#,
        ));
        let analyst = Analyst::new(provider.clone(), "google/gemini-2.5-flash").unwrap();

        let result = analyst.analyze_single(&single()).await.unwrap().into_inner();
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.confidence, 91);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "google/gemini-2.5-flash");
        assert_eq!(seen[0].system.as_deref(), Some(system::SINGLE_ANALYSIS));
        assert_eq!(seen[0].messages[0].role, Role::User);
        assert!(seen[0].messages[0].content.contains("Current Price: $120.50"));
    }

    #[tokio::test]
    async fn test_prose_reply_degrades() {
        let provider = Arc::new(ScriptedProvider::replying("Markets are closed."));
        let analyst = Analyst::new(provider, "m").unwrap();

        let result = analyst.analyze_single(&single()).await.unwrap();
        assert!(result.is_degraded());
        assert_eq!(result.get().summary.as_deref(), Some("Markets are closed."));
    }

    #[tokio::test]
    async fn test_compare_needs_two_prices() {
        let provider = Arc::new(ScriptedProvider::replying("{}"));
        let analyst = Analyst::new(provider.clone(), "m").unwrap();

        let request = MultiRequest {
            prices: vec![PricePoint::new("AAPL", 1.0)],
        };
        let err = analyst.compare(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compare_uses_comparison_prompt() {
        let provider = Arc::new(ScriptedProvider::replying(
            r#"{"rankings":[{"symbol":"AAPL"},{"symbol":"MSFT"}],"analysis":"Close call."}"#,
        ));
        let analyst = Analyst::new(provider.clone(), "m").unwrap();
        let request = MultiRequest {
            prices: vec![PricePoint::new("AAPL", 1.0), PricePoint::new("MSFT", 2.0)],
        };

        let outcome = run(&analyst, &AnalysisRequest::Multi(request)).await.unwrap();
        let AnalysisOutcome::Multi(comparison) = outcome else {
            panic!("expected comparison");
        };
        assert_eq!(comparison.get().rankings.len(), 2);
        assert_eq!(
            provider.seen.lock().unwrap()[0].system.as_deref(),
            Some(system::COMPARISON)
        );
    }

    #[tokio::test]
    async fn test_gateway_errors_propagate() {
        let provider = Arc::new(ScriptedProvider::failing(|| {
            LLMError::QuotaExceeded("payment required".to_string())
        }));
        let analyst = Analyst::new(provider, "m").unwrap();

        let err = analyst.analyze_single(&single()).await.unwrap_err();
        assert!(matches!(err, StockError::Llm(LLMError::QuotaExceeded(_))));
        assert_eq!(
            err.user_message(),
            "AI usage limit reached. Please add credits to continue."
        );
    }

    #[test]
    fn test_outcome_serializes_bare_result() {
        let outcome = AnalysisOutcome::Single(normalize_single("{}", &single()));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["symbol"], "NVDA");
        assert_eq!(json["signal"], "HOLD");
        assert!(json.get("Single").is_none());
    }
}
