//! Turning free-form model replies into typed results
//!
//! The model is asked for a bare JSON object but often wraps it in prose or
//! returns loosely typed fields. Nothing in here fails: unusable replies
//! degrade to a fallback result that still carries the raw text.

use crate::model::{
    ChartPatterns, ComparativeAnalysis, ComparisonAnalysis, Level, PricePoint, Ranking,
    RiskAssessment, Signal, SingleAnalysis, SingleRequest, SmartMoneyConcepts, Strategy, Strength,
    TechnicalAnalysis, TopPick, TrendAnalysis, TrendDirection,
};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const DEFAULT_CONFIDENCE: u8 = 50;
pub const UNKNOWN_SYMBOL: &str = "Unknown";
pub const NO_RECOMMENDATION: &str = "No recommendation";
pub const NO_COMPARISON: &str = "Comparison unavailable.";

// Greedy: first '{' through the last '}'
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}").unwrap_or_else(|e| unreachable!("invalid JSON_OBJECT pattern: {e}"))
});

/// A normalized result and whether it came from parsed JSON
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// Parsed from the model's JSON
    Validated(T),
    /// Fallback built around the raw reply text
    Degraded(T),
}

impl<T> Normalized<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Normalized::Degraded(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Normalized::Validated(v) | Normalized::Degraded(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Normalized::Validated(v) | Normalized::Degraded(v) => v,
        }
    }
}

// Both variants serialize as the bare result
impl<T: Serialize> Serialize for Normalized<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

/// Extract and parse the outermost `{...}` span of `raw`
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let span = JSON_OBJECT.find(raw)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "model reply is not valid JSON");
            None
        }
    }
}

/// Normalize a single-stock reply for `request`
///
/// Symbol, price and the timeframe/risk labels always come from the request.
pub fn normalize_single(raw: &str, request: &SingleRequest) -> Normalized<SingleAnalysis> {
    let mut analysis = SingleAnalysis::for_request(request);

    let Some(obj) = extract_json_object(raw) else {
        debug!(symbol = %request.symbol, "falling back to raw single-stock reply");
        analysis.summary = non_blank(raw);
        return Normalized::Degraded(analysis);
    };

    analysis.signal = obj
        .get("signal")
        .and_then(Value::as_str)
        .and_then(Signal::from_literal)
        .unwrap_or_default();
    analysis.confidence = obj.get("confidence").map_or(DEFAULT_CONFIDENCE, confidence);
    analysis.summary = obj.get("summary").and_then(text);
    analysis.analysis = obj.get("analysis").and_then(text);
    analysis.technical_analysis = section(&obj, "technicalAnalysis", |s| TechnicalAnalysis {
        rsi: field(s, "rsi"),
        macd: field(s, "macd"),
        moving_averages: field(s, "movingAverages"),
        volume: field(s, "volume"),
        support_resistance: field(s, "supportResistance"),
    })
    .filter(|s| !s.is_empty());
    analysis.chart_patterns = section(&obj, "chartPatterns", |s| ChartPatterns {
        candlestick: field(s, "candlestick"),
        formations: field(s, "formations"),
        interpretation: field(s, "interpretation"),
    })
    .filter(|s| !s.is_empty());
    analysis.smart_money_concepts = section(&obj, "smartMoneyConcepts", |s| SmartMoneyConcepts {
        order_blocks: field(s, "orderBlocks"),
        liquidity_zones: field(s, "liquidityZones"),
        fair_value_gaps: field(s, "fairValueGaps"),
        market_structure: field(s, "marketStructure"),
    })
    .filter(|s| !s.is_empty());
    analysis.trend_analysis = section(&obj, "trendAnalysis", |s| TrendAnalysis {
        direction: literal(s, "direction", TrendDirection::from_literal),
        strength: literal(s, "strength", Strength::from_literal),
        key_levels: field(s, "keyLevels"),
        reversal_signals: field(s, "reversalSignals"),
    })
    .filter(|s| !s.is_empty());
    analysis.strategy = section(&obj, "strategy", |s| Strategy {
        entry_zone: field(s, "entryZone"),
        stop_loss: field(s, "stopLoss"),
        take_profit: take_profit(s.get("takeProfit")),
        risk_reward: field(s, "riskReward"),
    })
    .filter(|s| !s.is_empty());
    analysis.risk_assessment = section(&obj, "riskAssessment", |s| RiskAssessment {
        volatility: literal(s, "volatility", Level::from_literal),
        overall_risk: literal(s, "overallRisk", Level::from_literal),
        position_sizing: field(s, "positionSizing"),
        warnings: field(s, "warnings"),
    })
    .filter(|s| !s.is_empty());

    Normalized::Validated(analysis)
}

/// Normalize a comparison reply for the given price points
pub fn normalize_comparison(raw: &str, stocks: &[PricePoint]) -> Normalized<ComparisonAnalysis> {
    let Some(obj) = extract_json_object(raw) else {
        debug!(stocks = stocks.len(), "falling back to raw comparison reply");
        return Normalized::Degraded(ComparisonAnalysis {
            stocks: stocks.to_vec(),
            rankings: Vec::new(),
            top_pick: None,
            comparative_analysis: None,
            analysis: non_blank(raw).unwrap_or_else(|| NO_COMPARISON.to_string()),
        });
    };

    let rankings = obj
        .get("rankings")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .map(|(i, entry)| ranking(i, entry))
                .collect()
        })
        .unwrap_or_default();

    let top_pick = obj
        .get("topPick")
        .and_then(Value::as_object)
        .and_then(|pick| {
            Some(TopPick {
                symbol: field(pick, "symbol")?,
                reasoning: field(pick, "reasoning"),
            })
        });

    let comparative_analysis = section(&obj, "comparativeAnalysis", |s| ComparativeAnalysis {
        strength_comparison: field(s, "strengthComparison"),
        risk_comparison: field(s, "riskComparison"),
        sector_analysis: field(s, "sectorAnalysis"),
    })
    .filter(|s| !s.is_empty());

    Normalized::Validated(ComparisonAnalysis {
        stocks: stocks.to_vec(),
        rankings,
        top_pick,
        comparative_analysis,
        analysis: obj
            .get("analysis")
            .and_then(text)
            .unwrap_or_else(|| NO_COMPARISON.to_string()),
    })
}

fn ranking(index: usize, entry: &Value) -> Ranking {
    let empty = Map::new();
    let obj = entry.as_object().unwrap_or(&empty);
    let position = u32::try_from(index + 1).unwrap_or(u32::MAX);

    Ranking {
        rank: obj.get("rank").and_then(positive_rank).unwrap_or(position),
        symbol: field(obj, "symbol").unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
        signal: literal(obj, "signal", Signal::from_literal),
        confidence: obj.get("confidence").filter(|v| !v.is_null()).map(confidence),
        strength: literal(obj, "strength", Strength::from_literal),
        volatility: literal(obj, "volatility", Level::from_literal),
        recommendation: field(obj, "recommendation")
            .unwrap_or_else(|| NO_RECOMMENDATION.to_string()),
    }
}

/// Numbers or numeric strings, rounded and clamped to 0..=100
fn confidence(value: &Value) -> u8 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .map_or(DEFAULT_CONFIDENCE, |n| n.round().clamp(0.0, 100.0) as u8)
}

/// Whole numbers >= 1, including integral floats such as `2.0`
fn positive_rank(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    let whole = n.fract().abs() < f64::EPSILON;
    (whole && n >= 1.0 && n <= f64::from(u32::MAX)).then(|| n as u32)
}

/// Strings pass through, numbers are stringified, anything else is absent
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(text)
}

fn literal<T>(obj: &Map<String, Value>, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    obj.get(key).and_then(Value::as_str).and_then(parse)
}

fn section<T>(
    obj: &Map<String, Value>,
    key: &str,
    build: impl FnOnce(&Map<String, Value>) -> T,
) -> Option<T> {
    obj.get(key).and_then(Value::as_object).map(build)
}

fn take_profit(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
        Some(other) => text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn non_blank(raw: &str) -> Option<String> {
    (!raw.trim().is_empty()).then(|| raw.to_string())
}
