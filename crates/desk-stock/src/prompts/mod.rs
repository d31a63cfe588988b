//! Prompt text for the AI gateway
//!
//! - `system`: fixed system prompts carrying the expected JSON schema
//! - `user`: minijinja templates filled from the request

pub mod system;
pub mod user;

use crate::error::Result;
use crate::model::{MultiRequest, SingleRequest};
use minijinja::{Environment, context};

/// Compiled user-message templates
#[derive(Debug)]
pub struct PromptSet {
    env: Environment<'static>,
}

impl PromptSet {
    /// Compile every user template
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(user::SINGLE_ANALYSIS, user::SINGLE_ANALYSIS_SOURCE)?;
        env.add_template(user::COMPARISON, user::COMPARISON_SOURCE)?;
        Ok(Self { env })
    }

    /// User message for a single-stock analysis
    pub fn single_analysis(&self, request: &SingleRequest) -> Result<String> {
        let template = self.env.get_template(user::SINGLE_ANALYSIS)?;
        Ok(template.render(context! {
            symbol => request.symbol,
            price => format!("{:.2}", request.price),
            timeframe => request.timeframe.as_str(),
            risk_profile => request.risk_profile.as_str(),
        })?)
    }

    /// User message listing each `SYMBOL: $PRICE` line
    pub fn comparison(&self, request: &MultiRequest) -> Result<String> {
        let stocks: Vec<_> = request
            .prices
            .iter()
            .map(|p| context! { symbol => p.symbol, price => format!("{:.2}", p.price) })
            .collect();

        let template = self.env.get_template(user::COMPARISON)?;
        Ok(template.render(context! { stocks })?)
    }
}
