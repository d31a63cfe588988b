use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::dto::{HealthResponse, PricesRequest};
use super::error::ApiError;
use super::state::AppState;
use crate::analysis::{self, AnalysisOutcome};
use crate::batch::{BatchQuotes, fetch_sequential};
use crate::desk::parse_symbol_list;
use crate::model::AnalysisRequest;

/// POST /api/analyze - single analysis or multi-stock comparison
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    let analyst = state.analyst()?;
    let Json(request) = payload?;

    let outcome = analysis::run(analyst, &request).await?;
    tracing::info!(degraded = outcome.is_degraded(), "analysis served");
    Ok(Json(outcome))
}

/// POST /api/prices - sequential quote lookup
pub async fn prices(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PricesRequest>, JsonRejection>,
) -> Result<Json<BatchQuotes>, ApiError> {
    let quotes = state.quotes()?;
    let Json(request) = payload?;

    let symbols = parse_symbol_list(&request.symbols.join(","));
    if symbols.is_empty() {
        return Err(ApiError::BadRequest("Symbols array is required".into()));
    }

    Ok(Json(fetch_sequential(quotes, &symbols, state.quote_delay).await))
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.info.app_name.clone(),
        version: state.info.version.clone(),
        environment: state.info.environment.clone(),
        quotes_configured: state.quotes.is_some(),
        ai_configured: state.analyst.is_some(),
    })
}
