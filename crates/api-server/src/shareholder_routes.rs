use axum::{extract::Query, routing::get, Json, Router};
use financial_data::{all_shareholders, shareholders_for};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShareholderQuery {
    /// Restrict to one year; all years when omitted.
    pub year: Option<i32>,
}

pub fn shareholder_routes() -> Router<AppState> {
    Router::new()
        .route("/api/shareholders", get(get_shareholders_data))
        .route("/api/shareholders/", get(get_shareholders_data))
}

/// Unknown years answer 200 with an inline `error` field rather than a 404.
#[utoipa::path(
    get,
    path = "/api/shareholders/",
    params(ShareholderQuery),
    responses((status = 200, description = "Shareholder composition for one or all years")),
    tag = "Shareholders"
)]
pub async fn get_shareholders_data(Query(query): Query<ShareholderQuery>) -> Json<Value> {
    match query.year {
        Some(year) => match shareholders_for(year) {
            Some(holders) => Json(json!(holders)),
            None => Json(json!({ "error": format!("No data available for year {}", year) })),
        },
        None => Json(json!(all_shareholders())),
    }
}
