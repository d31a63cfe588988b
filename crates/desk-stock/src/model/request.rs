use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PricePoint;

/// Trading horizon passed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Intraday,
    #[default]
    Swing,
    Longterm,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Intraday, Timeframe::Swing, Timeframe::Longterm];

    /// Token used on the wire and in prompts
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Intraday => "intraday",
            Timeframe::Swing => "swing",
            Timeframe::Longterm => "longterm",
        }
    }

    /// Human label shown on result cards
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Intraday => "Intraday",
            Timeframe::Swing => "Swing (1-4 weeks)",
            Timeframe::Longterm => "Long-term (3+ months)",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StockError::InvalidRequest(format!(
                    "unknown timeframe '{s}' (expected intraday, swing or longterm)"
                ))
            })
    }
}

/// Risk tolerance passed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StockError::InvalidRequest(format!(
                    "unknown risk profile '{s}' (expected conservative, moderate or aggressive)"
                ))
            })
    }
}

/// Single-stock analysis input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRequest {
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub risk_profile: RiskProfile,
}

impl SingleRequest {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        timeframe: Timeframe,
        risk_profile: RiskProfile,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timeframe,
            risk_profile,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(StockError::InvalidRequest("symbol is required".to_string()));
        }
        validate_price(&self.symbol, self.price)
    }
}

/// Multi-stock comparison input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRequest {
    pub prices: Vec<PricePoint>,
}

impl MultiRequest {
    /// Minimum number of price points a comparison needs
    pub const MIN_STOCKS: usize = 2;

    pub fn validate(&self) -> Result<()> {
        if self.prices.len() < Self::MIN_STOCKS {
            return Err(StockError::InvalidRequest(format!(
                "at least {} stocks are required for a comparison",
                Self::MIN_STOCKS
            )));
        }
        self.prices
            .iter()
            .try_for_each(|p| validate_price(&p.symbol, p.price))
    }
}

/// Body accepted by the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisRequest {
    Single(SingleRequest),
    Multi(MultiRequest),
}

fn validate_price(symbol: &str, price: f64) -> Result<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(StockError::InvalidRequest(format!(
            "price for {symbol} must be a positive number"
        )))
    }
}
