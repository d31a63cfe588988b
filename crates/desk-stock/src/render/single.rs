use super::{DISCLAIMER, View, card, confidence_band, signal_label};
use crate::model::{SingleAnalysis, Strategy};

const BAR_WIDTH: usize = 20;

/// Render the single-stock panel
pub fn render_single(data: Option<&SingleAnalysis>, is_loading: bool) -> String {
    match (View::select(data.is_some(), is_loading), data) {
        (View::Populated, Some(analysis)) => populated(analysis),
        (View::Loading, _) => "Analyzing...\nAI is processing your request".to_string(),
        _ => [
            "AI Analysis",
            "Enter a stock symbol to see AI-powered analysis",
            "",
            "Get professional-grade technical analysis with smart money concepts, chart patterns, and actionable trading strategies",
        ]
        .join("\n"),
    }
}

fn populated(a: &SingleAnalysis) -> String {
    let mut blocks = vec![
        format!("{}  ${:.2}\n{} · {}", a.symbol, a.price, a.timeframe, a.risk_profile),
        format!(
            "[{}] {}    Confidence {}%\n{}\n{}",
            a.signal.as_str(),
            signal_label(a.signal),
            a.confidence,
            confidence_bar(a.confidence),
            confidence_band(a.confidence)
        ),
    ];

    if let Some(text) = a.display_text() {
        blocks.push(format!("Summary\n{text}"));
    }

    blocks.extend(sections(a));
    blocks.push(DISCLAIMER.to_string());
    blocks.join("\n\n")
}

fn sections(a: &SingleAnalysis) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(t) = &a.technical_analysis {
        out.extend(card(
            "Technical Analysis",
            &[
                ("RSI", t.rsi.clone()),
                ("MACD", t.macd.clone()),
                ("Moving Averages", t.moving_averages.clone()),
                ("Volume", t.volume.clone()),
                ("Support/Resistance", t.support_resistance.clone()),
            ],
        ));
    }

    if let Some(c) = &a.chart_patterns {
        out.extend(card(
            "Chart Patterns",
            &[
                ("Candlestick Patterns", c.candlestick.clone()),
                ("Chart Formations", c.formations.clone()),
                ("Pattern Interpretation", c.interpretation.clone()),
            ],
        ));
    }

    if let Some(s) = &a.smart_money_concepts {
        out.extend(card(
            "Smart Money Concepts",
            &[
                ("Order Blocks", s.order_blocks.clone()),
                ("Liquidity Zones", s.liquidity_zones.clone()),
                ("Fair Value Gaps", s.fair_value_gaps.clone()),
                ("Market Structure", s.market_structure.clone()),
            ],
        ));
    }

    if let Some(t) = &a.trend_analysis {
        out.extend(card(
            "Trend Analysis",
            &[
                ("Direction", t.direction.map(|d| d.as_str().to_string())),
                ("Strength", t.strength.map(|s| s.as_str().to_string())),
                ("Key Levels", t.key_levels.clone()),
                ("Reversal Signals", t.reversal_signals.clone()),
            ],
        ));
    }

    if let Some(s) = &a.strategy {
        out.extend(strategy_card(s));
    }

    if let Some(r) = &a.risk_assessment {
        out.extend(card(
            "Risk Assessment",
            &[
                ("Volatility", r.volatility.map(|l| l.as_str().to_string())),
                ("Risk", r.overall_risk.map(|l| l.as_str().to_string())),
                ("Position Sizing", r.position_sizing.clone()),
                ("Warnings", r.warnings.clone()),
            ],
        ));
    }

    out
}

// Entry and stop always show, as N/A when missing
fn strategy_card(s: &Strategy) -> Option<String> {
    let na = |v: &Option<String>| Some(v.clone().unwrap_or_else(|| "N/A".to_string()));
    let targets = (!s.take_profit.is_empty()).then(|| {
        s.take_profit
            .iter()
            .enumerate()
            .map(|(i, tp)| format!("TP{}: {tp}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    });

    card(
        "Entry & Exit Strategy",
        &[
            ("Entry Zone", na(&s.entry_zone)),
            ("Stop Loss", na(&s.stop_loss)),
            ("Take Profit Targets", targets),
            ("Risk/Reward Ratio", s.risk_reward.clone()),
        ],
    )
}

fn confidence_bar(confidence: u8) -> String {
    let filled = (usize::from(confidence.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
