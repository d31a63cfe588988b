use crate::analysis::{AnalysisBackend, Analyst};
use crate::api::QuoteSource;
use crate::config::DeskConfig;
use crate::error::{Result, StockError};
use desk_llm::LLMError;
use desk_utils::AppInfo;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared state for all handlers
///
/// Collaborators are optional so the service can start without credentials;
/// requests that need a missing one fail with a configuration error.
pub struct AppState {
    pub quotes: Option<Arc<dyn QuoteSource>>,
    pub analyst: Option<Arc<dyn AnalysisBackend>>,
    pub quote_delay: Duration,
    pub info: AppInfo,
}

impl AppState {
    pub fn from_config(config: &DeskConfig, info: AppInfo) -> Result<Arc<Self>> {
        let quotes: Option<Arc<dyn QuoteSource>> = match config.quote_client() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "quote lookups disabled");
                None
            }
        };

        let analyst: Option<Arc<dyn AnalysisBackend>> = match config.llm_provider() {
            Ok(provider) => {
                let analyst = Analyst::new(Arc::new(provider), &config.ai_model)?;
                info!(model = analyst.model(), "AI analysis enabled");
                Some(Arc::new(analyst))
            }
            Err(e) => {
                warn!(error = %e, "AI analysis disabled");
                None
            }
        };

        Ok(Arc::new(Self {
            quotes,
            analyst,
            quote_delay: config.quote_delay,
            info,
        }))
    }

    pub fn quotes(&self) -> Result<&dyn QuoteSource> {
        self.quotes.as_deref().ok_or_else(|| {
            StockError::ConfigError("Stock data service not configured".to_string())
        })
    }

    pub fn analyst(&self) -> Result<&dyn AnalysisBackend> {
        self.analyst.as_deref().ok_or_else(|| {
            StockError::Llm(LLMError::ConfigurationError(
                "AI_GATEWAY_API_KEY is not set".to_string(),
            ))
        })
    }
}
