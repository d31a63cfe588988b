use serde::{Deserialize, Serialize};

use super::{RiskProfile, SingleRequest, Timeframe};

/// Trading recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }

    /// Exact literal match; anything else is not a signal
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(Signal::Buy),
            "SELL" => Some(Signal::Sell),
            "HOLD" => Some(Signal::Hold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Sideways,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Bullish => "BULLISH",
            TrendDirection::Bearish => "BEARISH",
            TrendDirection::Sideways => "SIDEWAYS",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "BULLISH" => Some(TrendDirection::Bullish),
            "BEARISH" => Some(TrendDirection::Bearish),
            "SIDEWAYS" => Some(TrendDirection::Sideways),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Strong => "STRONG",
            Strength::Moderate => "MODERATE",
            Strength::Weak => "WEAK",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "STRONG" => Some(Strength::Strong),
            "MODERATE" => Some(Strength::Moderate),
            "WEAK" => Some(Strength::Weak),
            _ => None,
        }
    }
}

/// HIGH / MEDIUM / LOW rating used for volatility and overall risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::High => "HIGH",
            Level::Medium => "MEDIUM",
            Level::Low => "LOW",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "HIGH" => Some(Level::High),
            "MEDIUM" => Some(Level::Medium),
            "LOW" => Some(Level::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_averages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_resistance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPatterns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candlestick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

/// Order blocks, liquidity zones and the like, kept as opaque model text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartMoneyConcepts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_blocks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_zones: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_value_gaps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_structure: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<TrendDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_levels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversal_signals: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub take_profit: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_risk: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_sizing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

impl TechnicalAnalysis {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl ChartPatterns {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl SmartMoneyConcepts {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl TrendAnalysis {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Strategy {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl RiskAssessment {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Normalized single-stock analysis
///
/// Every subsection is optional; an absent subsection is simply not rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleAnalysis {
    pub symbol: String,
    pub price: f64,
    pub signal: Signal,
    /// Percentage in `0..=100`
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_analysis: Option<TechnicalAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_patterns: Option<ChartPatterns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_money_concepts: Option<SmartMoneyConcepts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_analysis: Option<TrendAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
    /// Timeframe label, e.g. "Swing (1-4 weeks)"
    pub timeframe: String,
    /// Risk profile label, e.g. "Moderate"
    pub risk_profile: String,
}

impl SingleAnalysis {
    /// Skeleton carrying only the request context, HOLD and 50% confidence
    pub fn for_request(request: &SingleRequest) -> Self {
        Self {
            symbol: request.symbol.clone(),
            price: request.price,
            signal: Signal::Hold,
            confidence: 50,
            summary: None,
            analysis: None,
            technical_analysis: None,
            chart_patterns: None,
            smart_money_concepts: None,
            trend_analysis: None,
            strategy: None,
            risk_assessment: None,
            timeframe: label_timeframe(request.timeframe),
            risk_profile: label_risk(request.risk_profile),
        }
    }

    /// Text shown under the signal panel
    pub fn display_text(&self) -> Option<&str> {
        let non_empty = |s: &&str| !s.is_empty();
        self.summary
            .as_deref()
            .filter(non_empty)
            .or_else(|| self.analysis.as_deref().filter(non_empty))
    }
}

fn label_timeframe(timeframe: Timeframe) -> String {
    timeframe.label().to_string()
}

fn label_risk(risk: RiskProfile) -> String {
    risk.label().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_literals() {
        assert_eq!(Signal::from_literal("BUY"), Some(Signal::Buy));
        assert_eq!(Signal::from_literal("buy"), None);
        assert_eq!(Signal::default(), Signal::Hold);
        assert_eq!(serde_json::to_string(&Signal::Sell).unwrap(), r#""SELL""#);
    }

    #[test]
    fn test_skeleton_uses_labels() {
        let request = SingleRequest::new("AAPL", 185.5, Timeframe::Longterm, RiskProfile::Conservative);
        let analysis = SingleAnalysis::for_request(&request);
        assert_eq!(analysis.timeframe, "Long-term (3+ months)");
        assert_eq!(analysis.risk_profile, "Conservative");
        assert_eq!(analysis.confidence, 50);
        assert_eq!(analysis.display_text(), None);
    }

    #[test]
    fn test_absent_sections_are_not_serialized() {
        let request = SingleRequest::new("AAPL", 1.0, Timeframe::Swing, RiskProfile::Moderate);
        let json = serde_json::to_value(SingleAnalysis::for_request(&request)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(!keys.contains(&"technicalAnalysis"));
        assert!(!keys.contains(&"summary"));
        assert!(keys.contains(&"riskProfile"));
    }

    #[test]
    fn test_display_text_prefers_summary() {
        let request = SingleRequest::new("AAPL", 1.0, Timeframe::Swing, RiskProfile::Moderate);
        let mut analysis = SingleAnalysis::for_request(&request);
        analysis.analysis = Some("long form".into());
        assert_eq!(analysis.display_text(), Some("long form"));
        analysis.summary = Some("short".into());
        assert_eq!(analysis.display_text(), Some("short"));
    }

    #[test]
    fn test_empty_summary_falls_back_to_analysis() {
        let request = SingleRequest::new("AAPL", 1.0, Timeframe::Swing, RiskProfile::Moderate);
        let mut analysis = SingleAnalysis::for_request(&request);
        analysis.summary = Some(String::new());
        analysis.analysis = Some("long form".into());
        assert_eq!(analysis.display_text(), Some("long form"));

        analysis.analysis = Some(String::new());
        assert_eq!(analysis.display_text(), None);
    }
}
