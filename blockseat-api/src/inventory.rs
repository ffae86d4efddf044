use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use blockseat_catalog::{BlockSeatRecord, DateEntryBuilder, DraftAction, FlightDateEntry, InventoryDraft, InventoryForm};
use blockseat_core::SaveOutcome;
use serde::{Deserialize, Serialize};

use crate::{auth::Credential, error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSeatView {
    #[serde(flatten)]
    pub record: BlockSeatRecord,
    pub first_available_date: Option<FlightDateEntry>,
    pub seats_available: u32,
    pub route_label: String,
}

impl From<BlockSeatRecord> for BlockSeatView {
    fn from(record: BlockSeatRecord) -> Self {
        Self {
            first_available_date: record.first_available_date().cloned(),
            seats_available: record.seats_available(),
            route_label: record.route_label(),
            record,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    #[serde(flatten)]
    pub outcome: SaveOutcome,
    pub form: InventoryForm,
}

/// A scripted session against a fresh date-entry builder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePreviewRequest {
    #[serde(default)]
    pub round_trip: bool,
    #[serde(default)]
    pub actions: Vec<DraftAction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePreviewResponse {
    pub draft: InventoryDraft,
    pub outbound_duration: String,
    pub return_duration: String,
    pub toggle_label: &'static str,
    pub can_save: bool,
    pub message: Option<String>,
    /// The entry a save would commit, when the draft passes validation.
    pub entry: Option<FlightDateEntry>,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/block-seats", get(list_block_seats).post(create_block_seat))
        .route("/admin/block-seats/{id}", put(update_block_seat).delete(delete_block_seat))
        .route("/admin/block-seats/dates/preview", post(preview_dates))
}

async fn list_block_seats(
    State(state): State<AppState>,
    Credential(token): Credential,
) -> Result<Json<Vec<BlockSeatView>>, AppError> {
    let records = state.inventory.list(&token).await?;
    Ok(Json(records.into_iter().map(BlockSeatView::from).collect()))
}

async fn create_block_seat(
    State(state): State<AppState>,
    Credential(token): Credential,
    Json(mut form): Json<InventoryForm>,
) -> Result<(StatusCode, Json<SaveResponse>), AppError> {
    form.id = None;
    let outcome = state.inventory.submit(&token, &mut form).await?;
    Ok((StatusCode::CREATED, Json(SaveResponse { outcome, form })))
}

async fn update_block_seat(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path(id): Path<String>,
    Json(mut form): Json<InventoryForm>,
) -> Result<Json<SaveResponse>, AppError> {
    form.id = Some(id);
    let outcome = state.inventory.submit(&token, &mut form).await?;
    Ok(Json(SaveResponse { outcome, form }))
}

async fn delete_block_seat(
    State(state): State<AppState>,
    Credential(token): Credential,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.inventory.delete(&token, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replay draft edits on a new builder and report the derived stop times,
/// durations and whether the entry could be saved. Nothing is persisted.
async fn preview_dates(Json(req): Json<DatePreviewRequest>) -> Result<Json<DatePreviewResponse>, AppError> {
    let mut builder = DateEntryBuilder::new(req.round_trip);
    builder.open();
    for action in req.actions {
        builder
            .apply(action)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
    }

    let draft = builder.draft().clone();
    let outbound_duration = builder.outbound_duration();
    let return_duration = builder.return_duration();
    let toggle_label = builder.toggle_label();
    let verdict = builder.validate();

    let entry = match verdict {
        Ok(()) => {
            let mut committed = Vec::with_capacity(1);
            builder
                .save(&mut committed)
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            committed.pop()
        }
        Err(_) => None,
    };

    Ok(Json(DatePreviewResponse {
        draft,
        outbound_duration,
        return_duration,
        toggle_label,
        can_save: verdict.is_ok(),
        message: verdict.err().map(|e| e.to_string()),
        entry,
    }))
}
