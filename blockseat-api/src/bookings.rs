use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use blockseat_order::{Booking, BookingFilter, BookingKind, BookingStatus, DocumentKind};
use serde::Deserialize;

use crate::{auth::Credential, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: BookingStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/bookings/{kind}", get(list_bookings))
        .route("/admin/bookings/{kind}/{id}/status", patch(update_booking_status))
        .route("/admin/bookings/{kind}/{id}/{document}", get(download_document))
}

/// `packages` or `flights` in the URL.
fn booking_kind(segment: &str) -> Result<BookingKind, AppError> {
    match segment {
        "packages" => Ok(BookingKind::Package),
        "flights" => Ok(BookingKind::Flight),
        other => Err(AppError::NotFoundError(format!("Unknown booking type: {}", other))),
    }
}

async fn list_bookings(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path(kind): Path<String>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let kind = booking_kind(&kind)?;
    let bookings = state.bookings.list(&token, kind, &filter).await?;
    Ok(Json(bookings))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path((kind, id)): Path<(String, String)>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Booking>, AppError> {
    let kind = booking_kind(&kind)?;
    let booking = state.bookings.change_status(&token, kind, &id, req.status).await?;
    Ok(Json(booking))
}

async fn download_document(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path((kind, id, document)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let kind = booking_kind(&kind)?;
    let document: DocumentKind = document.parse()?;
    let rendered = state.bookings.document(&token, kind, &id, document).await?;

    let disposition = format!("attachment; filename=\"{}\"", rendered.filename);
    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}
