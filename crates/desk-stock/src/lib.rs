//! Stock signal desk
//!
//! This crate glues a quote provider and an AI chat-completion gateway into
//! trading-signal analysis. It includes:
//!
//! - Quote lookup against Alpha Vantage GLOBAL_QUOTE, one symbol at a time
//! - Single-stock analysis and multi-stock ranking prompts
//! - Normalization of loosely typed model replies into typed results
//! - Terminal rendering of results
//! - Desk state with request fencing, and the submission flows over it
//! - An HTTP service exposing `/api/analyze` and `/api/prices`
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_stock::{Analyst, DeskConfig, SingleRequest, AnalysisBackend};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DeskConfig::from_env()?;
//!     let analyst = Analyst::new(Arc::new(config.llm_provider()?), &config.ai_model)?;
//!
//!     let request = SingleRequest::new("AAPL", 185.5, Default::default(), Default::default());
//!     let result = analyst.analyze_single(&request).await?;
//!     println!("{}", desk_stock::render::render_single(Some(result.get()), false));
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod batch;
pub mod config;
pub mod desk;
pub mod error;
pub mod model;
pub mod prompts;
pub mod render;
pub mod server;

// Re-export main types for convenience
pub use analysis::{AnalysisBackend, AnalysisOutcome, Analyst, Normalized};
pub use api::{AlphaVantageClient, QuoteSource};
pub use batch::{BatchQuotes, fetch_sequential};
pub use config::DeskConfig;
pub use desk::{Desk, DeskState, Mode, Notice, SingleStockForm};
pub use error::{ErrorKind, Result, StockError};
pub use model::{
    AnalysisRequest, ComparisonAnalysis, MultiRequest, PricePoint, Quote, RiskProfile, Signal,
    SingleAnalysis, SingleRequest, Timeframe,
};
