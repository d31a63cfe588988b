use serde::{Deserialize, Serialize};

/// Current price of a symbol plus change metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change: 0.0,
            change_percent: 0.0,
        }
    }

    pub fn with_change(mut self, change: f64, change_percent: f64) -> Self {
        self.change = change;
        self.change_percent = change_percent;
        self
    }

    /// The `{symbol, price}` pair sent to the comparison prompt
    pub fn price_point(&self) -> PricePoint {
        PricePoint {
            symbol: self.symbol.clone(),
            price: self.price,
        }
    }
}

/// Symbol and price, as used in multi-stock requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub symbol: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }
}
