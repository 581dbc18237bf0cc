//! Financial statement endpoints over the in-memory sample store.

use analysis_core::FinancialRecord;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use financial_data::{with_derived_metrics, MetricCatalog};
use serde::Deserialize;

use crate::{AppError, AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DerivedQuery {
    /// Add gross and operating margins to each record.
    #[serde(default)]
    pub derived: bool,
}

pub fn financial_routes() -> Router<AppState> {
    Router::new()
        .route("/api/financial/metrics", get(get_available_metrics))
        .route("/api/financial/range/:start_year/:end_year", get(get_year_range_data))
        .route("/api/financial/:year", get(get_year_data))
}

fn present(records: Vec<FinancialRecord>, derived: bool) -> Vec<FinancialRecord> {
    if derived {
        records.iter().map(with_derived_metrics).collect()
    } else {
        records
    }
}

#[utoipa::path(
    get,
    path = "/api/financial/{year}",
    params(("year" = i32, Path, description = "Calendar year"), DerivedQuery),
    responses(
        (status = 200, description = "Quarterly records for the year"),
        (status = 404, description = "No data for the year")
    ),
    tag = "Financial"
)]
pub async fn get_year_data(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<DerivedQuery>,
) -> Result<Json<Vec<FinancialRecord>>, AppError> {
    let records = state.store.get_year(year);
    if records.is_empty() {
        return Err(AppError::NotFound(format!("No data found for year {}", year)));
    }

    Ok(Json(present(records.to_vec(), query.derived)))
}

#[utoipa::path(
    get,
    path = "/api/financial/range/{start_year}/{end_year}",
    params(
        ("start_year" = i32, Path, description = "First year, inclusive"),
        ("end_year" = i32, Path, description = "Last year, inclusive"),
        DerivedQuery
    ),
    responses(
        (status = 200, description = "Quarterly records for every known year in the range"),
        (status = 400, description = "Start year after end year"),
        (status = 404, description = "No data in the range")
    ),
    tag = "Financial"
)]
pub async fn get_year_range_data(
    State(state): State<AppState>,
    Path((start_year, end_year)): Path<(i32, i32)>,
    Query(query): Query<DerivedQuery>,
) -> Result<Json<Vec<FinancialRecord>>, AppError> {
    if start_year > end_year {
        return Err(AppError::BadRequest(
            "Start year must be less than or equal to end year".to_string(),
        ));
    }

    let records = state.store.get_range(start_year, end_year);
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No data found for years {} to {}",
            start_year, end_year
        )));
    }

    tracing::debug!(start_year, end_year, records = records.len(), "Range lookup");
    Ok(Json(present(records, query.derived)))
}

#[utoipa::path(
    get,
    path = "/api/financial/metrics",
    responses((status = 200, description = "Metric names grouped into ten categories")),
    tag = "Financial"
)]
pub async fn get_available_metrics() -> Json<MetricCatalog> {
    Json(MetricCatalog::standard())
}
