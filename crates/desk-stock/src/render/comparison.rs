use super::{Tone, View, card, new_table, ordinal};
use crate::model::ComparisonAnalysis;

/// Render the multi-stock comparison panel
pub fn render_comparison(data: Option<&ComparisonAnalysis>, is_loading: bool) -> String {
    match (View::select(data.is_some(), is_loading), data) {
        (View::Populated, Some(comparison)) => populated(comparison),
        (View::Loading, _) => "Comparing Stocks...".to_string(),
        _ => [
            "Comparison Results",
            "Enter multiple symbols to compare stocks",
            "",
            "Compare strength, volatility, and risk across multiple assets with AI-powered rankings",
        ]
        .join("\n"),
    }
}

fn populated(c: &ComparisonAnalysis) -> String {
    let mut prices = new_table();
    prices.set_header(vec!["Symbol", "Price"]);
    for stock in &c.stocks {
        prices.add_row(vec![stock.symbol.clone(), format!("${:.2}", stock.price)]);
    }

    let mut blocks = vec![
        format!(
            "Comparison Results\n{} stocks analyzed and ranked",
            c.stocks.len()
        ),
        prices.to_string(),
    ];

    if !c.rankings.is_empty() {
        let mut rankings = new_table();
        rankings.set_header(vec!["Rank", "Symbol", "Signal", "Confidence", "Recommendation"]);
        for r in &c.rankings {
            rankings.add_row(vec![
                ordinal(r.rank),
                r.symbol.clone(),
                r.signal.map(|s| s.as_str().to_string()).unwrap_or_default(),
                r.confidence.map(|v| format!("{v}%")).unwrap_or_default(),
                format!("{} {}", Tone::of(&r.recommendation).marker(), r.recommendation),
            ]);
        }
        blocks.push(format!("AI Rankings\n{rankings}"));
    }

    if let Some(pick) = &c.top_pick {
        blocks.push(match &pick.reasoning {
            Some(reasoning) => format!("Top Pick: {}\n{reasoning}", pick.symbol),
            None => format!("Top Pick: {}", pick.symbol),
        });
    }

    if let Some(ca) = &c.comparative_analysis {
        blocks.extend(card(
            "Comparative Analysis",
            &[
                ("Strength Comparison", ca.strength_comparison.clone()),
                ("Risk Comparison", ca.risk_comparison.clone()),
                ("Sector Analysis", ca.sector_analysis.clone()),
            ],
        ));
    }

    blocks.push(format!("Detailed Comparison\n{}", c.analysis));
    blocks.join("\n\n")
}
