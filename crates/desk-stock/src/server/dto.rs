use serde::{Deserialize, Serialize};

/// POST /api/prices request
#[derive(Debug, Deserialize)]
pub struct PricesRequest {
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    pub environment: String,
    pub quotes_configured: bool,
    pub ai_configured: bool,
}
