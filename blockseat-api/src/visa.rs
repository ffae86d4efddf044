use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use blockseat_order::{VisaAppointment, VisaFilter, VisaStatus};
use serde::Deserialize;

use crate::{auth::Credential, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct VisaStatusRequest {
    pub status: VisaStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/visa-appointments", get(list_appointments))
        .route("/admin/visa-appointments/{id}/status", patch(update_appointment_status))
}

async fn list_appointments(
    State(state): State<AppState>,
    Credential(token): Credential,
    Query(filter): Query<VisaFilter>,
) -> Result<Json<Vec<VisaAppointment>>, AppError> {
    Ok(Json(state.visas.list(&token, &filter).await?))
}

async fn update_appointment_status(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path(id): Path<String>,
    Json(req): Json<VisaStatusRequest>,
) -> Result<Json<VisaAppointment>, AppError> {
    let appointment = state.visas.change_status(&token, &id, req.status).await?;
    Ok(Json(appointment))
}
