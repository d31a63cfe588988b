//! Runtime configuration for the desk

use crate::api::AlphaVantageClient;
use crate::api::alpha_vantage::DEFAULT_BASE_URL;
use crate::error::{Result, StockError};
use desk_llm::LLMError;
use desk_llm::providers::{OpenAIConfig, OpenAIProvider};
use desk_utils::{EnvError, env_opt, env_or, env_parse};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_QUOTE_DELAY: Duration = Duration::from_millis(1200);
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Credentials and tunables for the quote provider, the AI gateway and the server
#[derive(Clone)]
pub struct DeskConfig {
    /// Alpha Vantage API key; quote lookups fail without it
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage host
    pub alpha_vantage_base_url: String,

    /// Optional client-side quota, requests per minute
    pub alpha_vantage_rate_limit: Option<u32>,

    /// Pause between consecutive quote requests in a batch
    pub quote_delay: Duration,

    /// Bearer key for the chat-completion gateway; analyses fail without it
    pub ai_gateway_api_key: Option<String>,

    /// Gateway base URL (the `/chat/completions` suffix is appended)
    pub ai_gateway_url: String,

    /// Model identifier sent with every completion
    pub ai_model: String,

    /// Completion request timeout
    pub ai_timeout: Duration,

    /// HTTP listen address
    pub addr: SocketAddr,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            alpha_vantage_base_url: DEFAULT_BASE_URL.to_string(),
            alpha_vantage_rate_limit: None,
            quote_delay: DEFAULT_QUOTE_DELAY,
            ai_gateway_api_key: None,
            ai_gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            ai_model: DEFAULT_MODEL.to_string(),
            ai_timeout: DEFAULT_AI_TIMEOUT,
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

// Keys stay out of logs
impl fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("DeskConfig")
            .field("alpha_vantage_api_key", &redact(&self.alpha_vantage_api_key))
            .field("alpha_vantage_base_url", &self.alpha_vantage_base_url)
            .field("alpha_vantage_rate_limit", &self.alpha_vantage_rate_limit)
            .field("quote_delay", &self.quote_delay)
            .field("ai_gateway_api_key", &redact(&self.ai_gateway_api_key))
            .field("ai_gateway_url", &self.ai_gateway_url)
            .field("ai_model", &self.ai_model)
            .field("ai_timeout", &self.ai_timeout)
            .field("addr", &self.addr)
            .finish()
    }
}

impl DeskConfig {
    /// Create a new configuration builder
    pub fn builder() -> DeskConfigBuilder {
        DeskConfigBuilder::default()
    }

    /// Read every setting from the process environment
    ///
    /// Missing credentials are not an error here; they surface per request.
    /// Malformed or out-of-range values are.
    pub fn from_env() -> Result<Self> {
        Self::read_env()
            .map_err(|e| StockError::ConfigError(e.to_string()))?
            .build()
    }

    fn read_env() -> std::result::Result<DeskConfigBuilder, EnvError> {
        let defaults = Self::default();
        let mut builder = Self::builder()
            .alpha_vantage_base_url(env_or("ALPHA_VANTAGE_BASE_URL", DEFAULT_BASE_URL))
            .ai_gateway_url(env_or("AI_GATEWAY_URL", DEFAULT_GATEWAY_URL))
            .ai_model(env_or("AI_MODEL", DEFAULT_MODEL))
            .quote_delay(
                env_parse::<u64>("QUOTE_DELAY_MS")?
                    .map_or(defaults.quote_delay, Duration::from_millis),
            )
            .ai_timeout(
                env_parse::<u64>("AI_TIMEOUT_SECS")?
                    .map_or(defaults.ai_timeout, Duration::from_secs),
            )
            .addr(env_parse::<SocketAddr>("SIGNAL_DESK_ADDR")?.unwrap_or(defaults.addr));

        if let Some(key) = env_opt("ALPHA_VANTAGE_API_KEY") {
            builder = builder.alpha_vantage_api_key(key);
        }
        if let Some(key) = env_opt("AI_GATEWAY_API_KEY") {
            builder = builder.ai_gateway_api_key(key);
        }
        if let Some(limit) = env_parse::<u32>("ALPHA_VANTAGE_RATE_LIMIT")? {
            builder = builder.alpha_vantage_rate_limit(limit);
        }

        Ok(builder)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ai_model.trim().is_empty() {
            return Err(StockError::ConfigError("AI model must not be empty".to_string()));
        }

        for (name, url) in [
            ("ALPHA_VANTAGE_BASE_URL", &self.alpha_vantage_base_url),
            ("AI_GATEWAY_URL", &self.ai_gateway_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(StockError::ConfigError(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if self.ai_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "AI timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the quote client, failing when no key is configured
    pub fn quote_client(&self) -> Result<AlphaVantageClient> {
        let key = self.alpha_vantage_api_key.as_deref().ok_or_else(|| {
            StockError::ConfigError("Stock data service not configured".to_string())
        })?;

        Ok(AlphaVantageClient::new(key)?
            .with_base_url(&self.alpha_vantage_base_url)
            .with_rate_limit(self.alpha_vantage_rate_limit.unwrap_or(0)))
    }

    /// Build the gateway provider, failing when no key is configured
    pub fn llm_provider(&self) -> Result<OpenAIProvider> {
        let key = self.ai_gateway_api_key.as_deref().ok_or_else(|| {
            LLMError::ConfigurationError("AI_GATEWAY_API_KEY is not set".to_string())
        })?;

        let config = OpenAIConfig::new(key)
            .with_api_base(&self.ai_gateway_url)
            .with_timeout(self.ai_timeout.as_secs());

        Ok(OpenAIProvider::with_config(config)?)
    }
}

/// Builder for DeskConfig
#[derive(Debug, Default)]
pub struct DeskConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_base_url: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    quote_delay: Option<Duration>,
    ai_gateway_api_key: Option<String>,
    ai_gateway_url: Option<String>,
    ai_model: Option<String>,
    ai_timeout: Option<Duration>,
    addr: Option<SocketAddr>,
}

impl DeskConfigBuilder {
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    pub fn alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = Some(url.into());
        self
    }

    /// Requests per minute; `0` disables the client-side quota
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    pub fn quote_delay(mut self, delay: Duration) -> Self {
        self.quote_delay = Some(delay);
        self
    }

    pub fn ai_gateway_api_key(mut self, key: impl Into<String>) -> Self {
        self.ai_gateway_api_key = Some(key.into());
        self
    }

    pub fn ai_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.ai_gateway_url = Some(url.into());
        self
    }

    pub fn ai_model(mut self, model: impl Into<String>) -> Self {
        self.ai_model = Some(model.into());
        self
    }

    pub fn ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = Some(timeout);
        self
    }

    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    fn finish(self) -> DeskConfig {
        let defaults = DeskConfig::default();

        DeskConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_base_url: self
                .alpha_vantage_base_url
                .unwrap_or(defaults.alpha_vantage_base_url),
            alpha_vantage_rate_limit: self.alpha_vantage_rate_limit,
            quote_delay: self.quote_delay.unwrap_or(defaults.quote_delay),
            ai_gateway_api_key: self.ai_gateway_api_key,
            ai_gateway_url: self.ai_gateway_url.unwrap_or(defaults.ai_gateway_url),
            ai_model: self.ai_model.unwrap_or(defaults.ai_model),
            ai_timeout: self.ai_timeout.unwrap_or(defaults.ai_timeout),
            addr: self.addr.unwrap_or(defaults.addr),
        }
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<DeskConfig> {
        let config = self.finish();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.quote_delay, Duration::from_millis(1200));
        assert_eq!(config.ai_model, "google/gemini-2.5-flash");
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DeskConfig::builder()
            .ai_model("openai/gpt-4o-mini")
            .quote_delay(Duration::ZERO)
            .alpha_vantage_rate_limit(5)
            .build()
            .unwrap();

        assert_eq!(config.ai_model, "openai/gpt-4o-mini");
        assert_eq!(config.quote_delay, Duration::ZERO);
        assert_eq!(config.alpha_vantage_rate_limit, Some(5));
        assert_eq!(config.ai_gateway_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let result = DeskConfig::builder().ai_gateway_url("gateway.local").build();
        assert!(matches!(result, Err(StockError::ConfigError(_))));
    }

    #[test]
    fn test_from_env_validates() {
        // Only this test touches these variables
        unsafe { std::env::set_var("AI_TIMEOUT_SECS", "0") };
        let zero_timeout = DeskConfig::from_env();
        unsafe { std::env::remove_var("AI_TIMEOUT_SECS") };
        assert!(matches!(zero_timeout, Err(StockError::ConfigError(_))));

        unsafe { std::env::set_var("AI_GATEWAY_URL", "gateway.local") };
        let bad_url = DeskConfig::from_env();
        unsafe { std::env::remove_var("AI_GATEWAY_URL") };
        let err = bad_url.unwrap_err();
        assert!(err.to_string().contains("AI_GATEWAY_URL"));
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        assert!(DeskConfig::builder().ai_model(" ").build().is_err());
    }

    #[test]
    fn test_missing_keys_fail_per_client() {
        let config = DeskConfig::default();

        let err = config.quote_client().unwrap_err();
        assert_eq!(err.user_message(), "Stock data service not configured");

        let err = config.llm_provider().unwrap_err();
        assert_eq!(err.user_message(), "AI service not configured");
    }

    #[test]
    fn test_clients_from_keys() {
        let config = DeskConfig::builder()
            .alpha_vantage_api_key("av")
            .ai_gateway_api_key("gw")
            .build()
            .unwrap();

        assert_eq!(config.quote_client().unwrap().base_url(), DEFAULT_BASE_URL);
        let provider = config.llm_provider().unwrap();
        assert_eq!(provider.config().api_base, DEFAULT_GATEWAY_URL);
        assert_eq!(provider.config().timeout_secs, 120);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = DeskConfig::builder()
            .alpha_vantage_api_key("secret-av")
            .ai_gateway_api_key("secret-gw")
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
