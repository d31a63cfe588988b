//! Plain data records exchanged between the fetcher, the analyst and the renderer

mod analysis;
mod comparison;
mod quote;
mod request;

pub use analysis::{
    ChartPatterns, Level, RiskAssessment, Signal, SingleAnalysis, SmartMoneyConcepts, Strategy,
    Strength, TechnicalAnalysis, TrendAnalysis, TrendDirection,
};
pub use comparison::{ComparativeAnalysis, ComparisonAnalysis, Ranking, TopPick};
pub use quote::{PricePoint, Quote};
pub use request::{AnalysisRequest, MultiRequest, RiskProfile, SingleRequest, Timeframe};
