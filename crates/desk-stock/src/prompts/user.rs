//! User message templates

/// Template name for the single-stock request
pub const SINGLE_ANALYSIS: &str = "desk.user.single_analysis";

/// Template name for the comparison request
pub const COMPARISON: &str = "desk.user.comparison";

pub(crate) const SINGLE_ANALYSIS_SOURCE: &str = "Analyze {{ symbol }} stock with comprehensive technical analysis.
Current Price: ${{ price }}
Trading Timeframe: {{ timeframe }}
Risk Profile: {{ risk_profile }}

Provide a complete professional analysis covering all technical indicators, chart patterns, smart money concepts, and actionable trading strategy with specific entry/exit points. Tailor the analysis to the specified timeframe and risk tolerance.";

pub(crate) const COMPARISON_SOURCE: &str = "Compare these stocks and rank them from best to worst investment opportunity:

{% for stock in stocks %}{{ stock.symbol }}: ${{ stock.price }}
{% endfor %}
Analyze their relative strength, volatility, risk factors, and provide clear recommendations for each. Identify the top pick and explain your reasoning with specific metrics.";
