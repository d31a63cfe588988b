//! HTTP service exposing quote lookup and analysis

mod dto;
mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/prices", post(handlers::prices))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "signal desk listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MockAnalysisBackend, normalize_comparison, normalize_single};
    use crate::api::MockQuoteSource;
    use crate::error::StockError;
    use crate::model::Quote;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use desk_llm::LLMError;
    use desk_utils::AppInfo;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(quotes: Option<MockQuoteSource>, analyst: Option<MockAnalysisBackend>) -> Router {
        router(Arc::new(AppState {
            quotes: quotes.map(|q| Arc::new(q) as Arc<dyn crate::api::QuoteSource>),
            analyst: analyst.map(|a| Arc::new(a) as Arc<dyn crate::analysis::AnalysisBackend>),
            quote_delay: Duration::ZERO,
            info: AppInfo::default(),
        }))
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(app(None, None), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai_configured"], false);
    }

    #[tokio::test]
    async fn test_single_analysis() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_analyze_single()
            .returning(|req| Ok(normalize_single("noise {\"signal\":\"BUY\",\"confidence\":120}", req)));

        let body = json!({ "type": "single", "symbol": "AAPL", "price": 185.5,
                           "timeframe": "swing", "riskProfile": "moderate" });
        let (status, json) = call(app(None, Some(backend)), "POST", "/api/analyze", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["signal"], "BUY");
        assert_eq!(json["confidence"], 100);
        assert_eq!(json["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn test_multi_analysis() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_compare()
            .returning(|req| Ok(normalize_comparison("no json", &req.prices)));

        let body = json!({ "type": "multi", "prices": [
            { "symbol": "AAPL", "price": 1.0 }, { "symbol": "MSFT", "price": 2.0 }] });
        let (status, json) = call(app(None, Some(backend)), "POST", "/api/analyze", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rankings"], json!([]));
        assert_eq!(json["analysis"], "no json");
    }

    #[tokio::test]
    async fn test_missing_ai_key() {
        let body = json!({ "type": "single", "symbol": "AAPL", "price": 1.0 });
        let (status, json) = call(app(None, None), "POST", "/api/analyze", Some(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "AI service not configured");
    }

    #[tokio::test]
    async fn test_gateway_status_mapping() {
        for (err, status, message) in [
            (
                LLMError::RateLimitExceeded(String::new()),
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again in a moment.",
            ),
            (
                LLMError::QuotaExceeded(String::new()),
                StatusCode::PAYMENT_REQUIRED,
                "AI usage limit reached. Please add credits to continue.",
            ),
        ] {
            let mut backend = MockAnalysisBackend::new();
            let mut err = Some(err);
            backend
                .expect_analyze_single()
                .times(1)
                .returning(move |_| Err(StockError::from(err.take().unwrap())));

            let body = json!({ "type": "single", "symbol": "AAPL", "price": 1.0 });
            let (got, json) = call(app(None, Some(backend)), "POST", "/api/analyze", Some(body)).await;
            assert_eq!(got, status);
            assert_eq!(json["error"], message);
        }
    }

    #[tokio::test]
    async fn test_bad_request_bodies() {
        let backend = MockAnalysisBackend::new();
        let (status, json) = call(
            app(None, Some(backend)),
            "POST",
            "/api/analyze",
            Some(json!({ "type": "weekly" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let mut backend = MockAnalysisBackend::new();
        backend.expect_compare().returning(|req| {
            req.validate()?;
            Ok(normalize_comparison("{}", &req.prices))
        });
        let body = json!({ "type": "multi", "prices": [{ "symbol": "AAPL", "price": 1.0 }] });
        let (status, _) = call(app(None, Some(backend)), "POST", "/api/analyze", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_prices_endpoint() {
        let mut quotes = MockQuoteSource::new();
        quotes.expect_name().return_const("mock");
        quotes.expect_get_quote().returning(|s| {
            if s == "BBB" {
                Err(StockError::InvalidSymbol(s.to_string()))
            } else {
                Ok(Quote::new(s, 12.5).with_change(0.5, 4.0))
            }
        });

        let body = json!({ "symbols": ["aaa", "BBB"] });
        let (status, json) = call(app(Some(quotes), None), "POST", "/api/prices", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"][0]["symbol"], "AAA");
        assert_eq!(json["success"][0]["changePercent"], 4.0);
        assert_eq!(json["failed"], json!(["BBB"]));
    }

    #[tokio::test]
    async fn test_prices_requires_symbols() {
        let quotes = MockQuoteSource::new();
        let (status, json) = call(
            app(Some(quotes), None),
            "POST",
            "/api/prices",
            Some(json!({ "symbols": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Symbols array is required");

        let (status, json) = call(app(None, None), "POST", "/api/prices", Some(json!({ "symbols": ["A"] }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Stock data service not configured");
    }
}
