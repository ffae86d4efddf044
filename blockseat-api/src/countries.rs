use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use blockseat_catalog::{CountryEntry, CountryGrouping};
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct GroupAirportsRequest {
    pub airports: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/countries", get(list_countries))
        .route("/admin/countries/airports/{code}", get(country_for_airport))
        .route("/admin/countries/group", post(group_airports))
}

async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryEntry>> {
    Json(state.countries.entries().to_vec())
}

async fn country_for_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CountryEntry>, AppError> {
    state
        .countries
        .by_airport(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("No country mapped for airport {}", code.to_uppercase())))
}

async fn group_airports(
    State(state): State<AppState>,
    Json(req): Json<GroupAirportsRequest>,
) -> Json<CountryGrouping> {
    Json(state.countries.group_airports(&req.airports))
}
