//! signal-desk command-line front end
//!
//! Usage:
//! ```bash
//! export ALPHA_VANTAGE_API_KEY=your_key
//! export AI_GATEWAY_API_KEY=your_key
//!
//! signal-desk serve --addr 0.0.0.0:3000
//! signal-desk analyze NVDA --timeframe swing --risk moderate
//! signal-desk analyze TSLA --price 242.10 --json
//! signal-desk compare AAPL,MSFT,GOOGL
//! ```

use anyhow::{Context, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use desk_stock::desk::parse_symbol_list;
use desk_stock::render::{render_comparison, render_image_placeholder, render_single};
use desk_stock::server::{self, AppState};
use desk_stock::{
    Analyst, Desk, DeskConfig, DeskState, Mode, Notice, Quote, QuoteSource, SingleStockForm,
    StockError,
};
use desk_utils::AppInfo;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "signal-desk")]
#[command(about = "AI trading-signal desk over Alpha Vantage quotes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen address, overrides SIGNAL_DESK_ADDR
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Analyze a single stock
    Analyze {
        symbol: String,
        /// Skip the quote lookup and use this price
        #[arg(long)]
        price: Option<String>,
        /// intraday, swing or longterm
        #[arg(long, default_value = "swing")]
        timeframe: String,
        /// conservative, moderate or aggressive
        #[arg(long, default_value = "moderate")]
        risk: String,
        /// Print the analysis as JSON instead of a card
        #[arg(long)]
        json: bool,
    },
    /// Rank several stocks against each other
    Compare {
        /// Comma-separated symbols, e.g. AAPL,MSFT,GOOGL
        symbols: String,
        #[arg(long)]
        json: bool,
    },
    /// Chart-image analysis (not available yet)
    Chart,
}

/// Stands in for the quote provider when no key is configured
struct QuotesUnavailable;

#[async_trait]
impl QuoteSource for QuotesUnavailable {
    async fn get_quote(&self, _symbol: &str) -> desk_stock::Result<Quote> {
        Err(StockError::ConfigError(
            "Stock data service not configured".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

fn quote_source(config: &DeskConfig) -> Box<dyn QuoteSource> {
    match config.quote_client() {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!(error = %e, "quote lookups disabled");
            Box::new(QuotesUnavailable)
        }
    }
}

fn build_desk(config: &DeskConfig) -> anyhow::Result<Desk<Box<dyn QuoteSource>, Analyst>> {
    let provider = config
        .llm_provider()
        .context("AI_GATEWAY_API_KEY is required for analysis")?;
    let analyst = Analyst::new(Arc::new(provider), &config.ai_model)?;
    Ok(Desk::new(quote_source(config), analyst).with_quote_delay(config.quote_delay))
}

fn print_notices(state: DeskState) -> DeskState {
    let (state, notices) = state.take_notices();
    for notice in &notices {
        print_notice(notice);
    }
    state
}

fn print_notice(notice: &Notice) {
    eprintln!("{notice}");
}

async fn run(command: Command, mut config: DeskConfig) -> anyhow::Result<()> {
    match command {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.addr = addr;
            }
            let state = AppState::from_config(&config, AppInfo::from_env())?;
            server::serve(state, config.addr).await?;
        }
        Command::Analyze {
            symbol,
            price,
            timeframe,
            risk,
            json,
        } => {
            let form = SingleStockForm::parse(&symbol, price.as_deref(), &timeframe, &risk)?;
            let desk = build_desk(&config)?;

            let state = desk.submit_single(DeskState::new(Mode::Single), form).await;
            let state = print_notices(state);

            if let Some(message) = &state.price_error {
                bail!("{message} Re-run with --price to analyze anyway.");
            }
            if let Some(message) = &state.last_error {
                bail!("{message}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state.single)?);
            } else {
                println!("{}", render_single(state.single.as_ref(), false));
            }
        }
        Command::Compare { symbols, json } => {
            let symbols = parse_symbol_list(&symbols);
            let desk = build_desk(&config)?;

            let state = desk
                .submit_comparison(DeskState::new(Mode::Multi), &symbols)
                .await;
            let state = print_notices(state);

            if let Some(message) = &state.last_error {
                bail!("{message}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state.comparison)?);
            } else {
                println!("{}", render_comparison(state.comparison.as_ref(), false));
            }
        }
        Command::Chart => println!("{}", render_image_placeholder()),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    desk_utils::init_tracing();

    let cli = Cli::parse();
    let config = DeskConfig::from_env()?;
    info!(model = %config.ai_model, "signal-desk starting");

    run(cli.command, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["signal-desk", "analyze", "nvda"]).unwrap();
        match cli.command {
            Command::Analyze {
                symbol,
                price,
                timeframe,
                risk,
                json,
            } => {
                assert_eq!(symbol, "nvda");
                assert!(price.is_none());
                assert_eq!(timeframe, "swing");
                assert_eq!(risk, "moderate");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_addr() {
        let cli = Cli::try_parse_from(["signal-desk", "serve", "--addr", "127.0.0.1:8080"]).unwrap();
        match cli.command {
            Command::Serve { addr } => {
                assert_eq!(addr, Some("127.0.0.1:8080".parse().unwrap()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_addr_rejected() {
        assert!(Cli::try_parse_from(["signal-desk", "serve", "--addr", "nowhere"]).is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_quotes_fail_with_config_error() {
        let err = QuotesUnavailable.get_quote("AAPL").await.unwrap_err();
        assert_eq!(err.user_message(), "Stock data service not configured");
    }
}
