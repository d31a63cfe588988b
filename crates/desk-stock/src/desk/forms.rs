//! Parsing of raw form input

use crate::error::{Result, StockError};
use crate::model::{RiskProfile, SingleRequest, Timeframe};
use std::collections::HashSet;

/// Validated single-stock form
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStockForm {
    pub symbol: String,
    /// Overrides the quote lookup when present
    pub manual_price: Option<f64>,
    pub timeframe: Timeframe,
    pub risk_profile: RiskProfile,
}

impl SingleStockForm {
    /// Parse raw field values
    ///
    /// The symbol is trimmed and upper-cased. A blank manual price means "look it up".
    pub fn parse(
        symbol: &str,
        manual_price: Option<&str>,
        timeframe: &str,
        risk_profile: &str,
    ) -> Result<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StockError::InvalidRequest("symbol is required".to_string()));
        }

        let manual_price = match manual_price.map(str::trim).filter(|p| !p.is_empty()) {
            None => None,
            Some(raw) => Some(parse_price(raw)?),
        };

        Ok(Self {
            symbol,
            manual_price,
            timeframe: timeframe.parse()?,
            risk_profile: risk_profile.parse()?,
        })
    }

    pub fn into_request(self, price: f64) -> SingleRequest {
        SingleRequest::new(self.symbol, price, self.timeframe, self.risk_profile)
    }
}

fn parse_price(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| {
            StockError::InvalidRequest(format!("manual price '{raw}' must be a positive number"))
        })
}

/// Split a comma-separated symbol list; duplicates are kept
pub fn parse_symbol_list(input: &str) -> Vec<String> {
    input
        .to_uppercase()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// A comparison needs at least two distinct symbols
pub fn can_compare(symbols: &[String]) -> bool {
    symbols.iter().collect::<HashSet<_>>().len() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[test]
    fn test_single_form() {
        let form = SingleStockForm::parse("  tsla ", Some(""), "swing", "moderate").unwrap();
        assert_eq!(form.symbol, "TSLA");
        assert_eq!(form.manual_price, None);

        let form = SingleStockForm::parse("aapl", Some(" 185.50 "), "intraday", "aggressive").unwrap();
        assert_eq!(form.manual_price, Some(185.5));
        assert_eq!(form.timeframe, Timeframe::Intraday);

        let request = form.into_request(185.5);
        assert_eq!(request.symbol, "AAPL");
        assert_eq!(request.risk_profile, RiskProfile::Aggressive);
    }

    #[test]
    fn test_single_form_rejections() {
        assert_err!(SingleStockForm::parse("   ", None, "swing", "moderate"));
        assert_err!(SingleStockForm::parse("AAPL", Some("abc"), "swing", "moderate"));
        assert_err!(SingleStockForm::parse("AAPL", Some("-3"), "swing", "moderate"));
        assert_err!(SingleStockForm::parse("AAPL", Some("0"), "swing", "moderate"));
        assert_err!(SingleStockForm::parse("AAPL", None, "weekly", "moderate"));
    }

    #[test]
    fn test_symbol_list() {
        assert_eq!(
            parse_symbol_list("aapl, msft,,  tsla ,"),
            vec!["AAPL", "MSFT", "TSLA"]
        );
        assert_eq!(parse_symbol_list("aapl,AAPL"), vec!["AAPL", "AAPL"]);
        assert!(parse_symbol_list(" , ").is_empty());
    }

    #[test]
    fn test_can_compare() {
        assert!(can_compare(&parse_symbol_list("AAPL,MSFT")));
        assert!(can_compare(&parse_symbol_list("AAPL,AAPL,MSFT")));
        assert!(!can_compare(&parse_symbol_list("AAPL,aapl")));
        assert!(!can_compare(&parse_symbol_list("AAPL")));
    }
}
