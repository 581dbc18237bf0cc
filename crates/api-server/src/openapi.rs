use axum::Json;
use utoipa::OpenApi;

use crate::{ai_routes, financial_routes, shareholder_routes};

#[derive(OpenApi)]
#[openapi(
    info(title = "Finance Dashboard API", description = "Sample financial statements, forecasts and insights"),
    paths(
        crate::health,
        financial_routes::get_year_data,
        financial_routes::get_year_range_data,
        financial_routes::get_available_metrics,
        shareholder_routes::get_shareholders_data,
        ai_routes::forecast,
        ai_routes::fitted_forecast,
        ai_routes::insights,
        ai_routes::computed_insights,
    ),
    components(schemas(
        analysis_core::ForecastPoint,
        analysis_core::GrowthPoint,
        ai_routes::ForecastRequest,
        ai_routes::InsightRequest,
        ai_routes::GrowthForecastResponse,
        ai_routes::FittedForecastResponse,
        ai_routes::InsightResponse,
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Financial", description = "Quarterly statement data"),
        (name = "Shareholders", description = "Ownership composition"),
        (name = "AI", description = "Forecasts and insights"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
