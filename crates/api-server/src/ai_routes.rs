use ai_analysis::{
    compound_forecast, generate_forecast, generate_insight, static_insight, MAX_FORECAST_YEARS,
};
use analysis_core::{ForecastPoint, GrowthPoint};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiJson;
use crate::{AppError, AppState};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ForecastRequest {
    /// Metric key, e.g. `revenue` or `profitMargin`.
    pub metric: String,
    /// Number of years to project past the last stored year; at most 50.
    pub years: i32,
}

impl ForecastRequest {
    /// Horizons above [`MAX_FORECAST_YEARS`] are rejected; zero or negative
    /// horizons are allowed and produce an empty forecast.
    fn checked_years(&self) -> Result<i32, AppError> {
        if self.years > MAX_FORECAST_YEARS {
            return Err(AppError::BadRequest(format!(
                "years must be at most {}, got {}",
                MAX_FORECAST_YEARS, self.years
            )));
        }
        Ok(self.years)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct InsightRequest {
    pub metric: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GrowthForecastResponse {
    pub forecast: Vec<GrowthPoint>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FittedForecastResponse {
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsightResponse {
    pub insight: String,
}

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/forecast", post(forecast))
        .route("/api/ai/forecast/fitted", post(fitted_forecast))
        .route("/api/ai/insights", post(insights))
        .route("/api/ai/insights/computed", post(computed_insights))
}

/// Compounding projection from fixed per-metric constants.
#[utoipa::path(
    post,
    path = "/api/ai/forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Compounded projection", body = GrowthForecastResponse),
        (status = 400, description = "Horizon too long")
    ),
    tag = "AI"
)]
pub async fn forecast(
    ApiJson(req): ApiJson<ForecastRequest>,
) -> Result<Json<GrowthForecastResponse>, AppError> {
    let years = req.checked_years()?;
    Ok(Json(GrowthForecastResponse {
        forecast: compound_forecast(&req.metric, years),
    }))
}

/// Linear fit over the stored annual history with noise on each projection.
#[utoipa::path(
    post,
    path = "/api/ai/forecast/fitted",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Projected points after the last stored year", body = FittedForecastResponse),
        (status = 400, description = "Horizon too long"),
        (status = 500, description = "Unknown metric or failed computation")
    ),
    tag = "AI"
)]
pub async fn fitted_forecast(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForecastRequest>,
) -> Result<Json<FittedForecastResponse>, AppError> {
    let years = req.checked_years()?;
    let forecast = generate_forecast(&state.store, &req.metric, years)?;
    tracing::info!(metric = %req.metric, years = req.years, points = forecast.len(), "Fitted forecast");

    Ok(Json(FittedForecastResponse { forecast }))
}

#[utoipa::path(
    post,
    path = "/api/ai/insights",
    request_body = InsightRequest,
    responses((status = 200, description = "Canned insight text", body = InsightResponse)),
    tag = "AI"
)]
pub async fn insights(ApiJson(req): ApiJson<InsightRequest>) -> Json<InsightResponse> {
    Json(InsightResponse {
        insight: static_insight(&req.metric).to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/ai/insights/computed",
    request_body = InsightRequest,
    responses(
        (status = 200, description = "Insight computed from stored history", body = InsightResponse),
        (status = 500, description = "Unknown metric or too little data")
    ),
    tag = "AI"
)]
pub async fn computed_insights(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<InsightRequest>,
) -> Result<Json<InsightResponse>, AppError> {
    let insight = generate_insight(&state.store, &req.metric)?;
    Ok(Json(InsightResponse { insight }))
}
