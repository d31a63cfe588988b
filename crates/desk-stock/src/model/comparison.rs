use serde::{Deserialize, Serialize};

use super::{Level, PricePoint, Signal, Strength};

/// One entry of the model's best-to-worst ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based position
    pub rank: u32,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Level>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPick {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_analysis: Option<String>,
}

impl ComparativeAnalysis {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Normalized multi-stock comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonAnalysis {
    pub stocks: Vec<PricePoint>,
    pub rankings: Vec<Ranking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_pick: Option<TopPick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparative_analysis: Option<ComparativeAnalysis>,
    pub analysis: String,
}

impl ComparisonAnalysis {
    pub fn ranked_first(&self) -> Option<&Ranking> {
        self.rankings.iter().find(|r| r.rank == 1)
    }
}
