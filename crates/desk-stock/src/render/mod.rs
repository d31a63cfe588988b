//! Terminal rendering of analysis results
//!
//! Every renderer is a pure function of its input and picks one of three
//! views: a loading placeholder, an empty-state prompt or the populated result.

pub mod comparison;
pub mod single;

pub use comparison::render_comparison;
pub use single::render_single;

use crate::model::Signal;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

pub const DISCLAIMER: &str = "Disclaimer: This analysis is for educational purposes only and should not be considered as financial advice. Always conduct your own research.";

const TABLE_WIDTH: u16 = 100;

/// Which of the three views a renderer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Empty,
    Populated,
}

impl View {
    /// Loading wins over any stale result still held by the caller
    pub fn select(has_result: bool, is_loading: bool) -> Self {
        match (is_loading, has_result) {
            (true, _) => View::Loading,
            (false, false) => View::Empty,
            (false, true) => View::Populated,
        }
    }
}

/// Direction hint derived from a free-text recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Up,
    Down,
    Warning,
}

impl Tone {
    pub fn of(recommendation: &str) -> Self {
        let lower = recommendation.to_lowercase();
        if lower.contains("buy") || lower.contains("strong") {
            Tone::Up
        } else if lower.contains("sell") || lower.contains("avoid") {
            Tone::Down
        } else {
            Tone::Warning
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Tone::Up => "↑",
            Tone::Down => "↓",
            Tone::Warning => "⚠",
        }
    }
}

pub fn signal_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "Strong Buy Signal",
        Signal::Sell => "Sell Signal",
        Signal::Hold => "Hold Position",
    }
}

pub fn confidence_band(confidence: u8) -> &'static str {
    match confidence {
        80.. => "High confidence - Strong conviction in this analysis",
        60..=79 => "Moderate confidence - Consider additional research",
        _ => "Lower confidence - Proceed with caution",
    }
}

/// 1st, 2nd, 3rd, then `{n}th`
pub fn ordinal(rank: u32) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

/// Placeholder shown for the chart-image mode
pub fn render_image_placeholder() -> String {
    [
        "Chart Image Analysis",
        "Upload technical charts for AI-powered pattern recognition",
        "",
        "Coming Soon",
        "Chart analysis results will appear here when the feature launches.",
        "Gemini Vision-based chart analysis will allow you to upload candlestick charts, identify patterns, and get instant AI insights.",
    ]
    .join("\n")
}

pub(crate) fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
    table
}

/// Titled two-column card; rows without a value are dropped
pub(crate) fn card(title: &str, rows: &[(&str, Option<String>)]) -> Option<String> {
    let present: Vec<_> = rows
        .iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| (*label, v.as_str())))
        .collect();
    if present.is_empty() {
        return None;
    }

    let mut table = new_table();
    for (label, value) in present {
        table.add_row(vec![label, value]);
    }
    Some(format!("{title}\n{table}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_selection() {
        assert_eq!(View::select(true, true), View::Loading);
        assert_eq!(View::select(false, true), View::Loading);
        assert_eq!(View::select(false, false), View::Empty);
        assert_eq!(View::select(true, false), View::Populated);
    }

    #[test]
    fn test_confidence_bands() {
        assert!(confidence_band(80).starts_with("High"));
        assert!(confidence_band(79).starts_with("Moderate"));
        assert!(confidence_band(60).starts_with("Moderate"));
        assert!(confidence_band(59).starts_with("Lower"));
        assert!(confidence_band(0).starts_with("Lower"));
    }

    #[test]
    fn test_ordinals() {
        let badges: Vec<String> = (1..=5).map(ordinal).collect();
        assert_eq!(badges, vec!["1st", "2nd", "3rd", "4th", "5th"]);
    }

    #[test]
    fn test_recommendation_tone() {
        assert_eq!(Tone::of("Strong accumulation zone"), Tone::Up);
        assert_eq!(Tone::of("BUY on pullbacks"), Tone::Up);
        assert_eq!(Tone::of("Avoid until earnings"), Tone::Down);
        assert_eq!(Tone::of("Trim / sell into strength"), Tone::Down);
        assert_eq!(Tone::of("Strong sell pressure"), Tone::Up);
        assert_eq!(Tone::of("Wait and see"), Tone::Warning);
    }

    #[test]
    fn test_card_skips_missing_rows() {
        assert!(card("Empty", &[("RSI", None)]).is_none());

        let text = card("Technical Analysis", &[("RSI", Some("62".into())), ("MACD", None)]).unwrap();
        assert!(text.starts_with("Technical Analysis\n"));
        assert!(text.contains("RSI"));
        assert!(!text.contains("MACD"));
    }

    #[test]
    fn test_image_placeholder() {
        assert!(render_image_placeholder().contains("Coming Soon"));
    }
}
