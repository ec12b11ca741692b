// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The service is a read-only analysis
// surface, so every endpoint is public.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::analysis::{analyze, AnalysisReport};
use crate::app_state::AppState;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze_ticker))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    analyses_served: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        analyses_served: state.analyses_served(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Analyze
// =============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    ticker: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    /// Unique identifier for this analysis run (UUID v4).
    id: String,
    ticker: String,
    /// ISO 8601 timestamp of when the analysis completed.
    created_at: String,
    report: AnalysisReport,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn analyze_ticker(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let ticker = req.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "ticker must not be blank");
    }

    // Snapshot the config before awaiting; the lock must not be held across
    // the fetch.
    let (range, params) = {
        let cfg = state.runtime_config.read();
        (cfg.data_range.clone(), cfg.analysis_params())
    };

    let series = match state.market.fetch_daily_series(&ticker, &range).await {
        Ok(series) => series,
        Err(e) => {
            warn!(ticker = %ticker, error = %e, "market data fetch failed");
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("failed to fetch price history for {ticker}"),
            );
        }
    };

    let report = match analyze(&series, &params) {
        Ok(report) => report,
        Err(e) => {
            info!(ticker = %ticker, bars = series.len(), error = %e, "analysis rejected");
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "not enough history for this ticker",
            );
        }
    };

    let served = state.record_analysis();
    info!(
        ticker = %ticker,
        signal = %report.recommendation.signal,
        branch = ?report.recommendation.branch,
        r_squared = report.forecast.r_squared,
        served,
        "analysis complete"
    );

    let resp = AnalyzeResponse {
        id: uuid::Uuid::new_v4().to_string(),
        ticker,
        created_at: chrono::Utc::now().to_rfc3339(),
        report,
    };
    (StatusCode::OK, Json(resp)).into_response()
}
