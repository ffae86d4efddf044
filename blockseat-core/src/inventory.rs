use std::sync::Arc;

use blockseat_catalog::{prepare_submission, BlockSeatRecord, InventoryForm, Submission};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::identity::AuthToken;
use crate::repository::BlockSeatRepository;
use crate::{CoreError, CoreResult};

/// Result of saving an inventory form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveOutcome {
    Created { record: BlockSeatRecord },
    Updated { record: BlockSeatRecord },
    /// Nothing changed; no request was made.
    Unchanged { id: String },
}

impl SaveOutcome {
    pub fn id(&self) -> &str {
        match self {
            SaveOutcome::Created { record } | SaveOutcome::Updated { record } => &record.id,
            SaveOutcome::Unchanged { id } => id,
        }
    }
}

/// Create, edit, list and delete block-seat inventory.
#[derive(Clone)]
pub struct InventoryService {
    repo: Arc<dyn BlockSeatRepository>,
}

impl InventoryService {
    pub fn new(repo: Arc<dyn BlockSeatRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, token: &AuthToken) -> CoreResult<Vec<BlockSeatRecord>> {
        self.repo.list(token).await
    }

    pub async fn find(&self, token: &AuthToken, id: &str) -> CoreResult<BlockSeatRecord> {
        self.repo
            .list(token)
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("block seat {}", id)))
    }

    /// Save the form. A form with an id is an edit: only the fields that
    /// differ from the stored record are sent, and nothing is sent when the
    /// diff is empty. The form takes over the returned id on success and is
    /// left untouched on failure.
    pub async fn submit(&self, token: &AuthToken, form: &mut InventoryForm) -> CoreResult<SaveOutcome> {
        let original = match form.id.as_deref() {
            Some(id) => Some(self.find(token, id).await?),
            None => None,
        };

        let outcome = match prepare_submission(form, original.as_ref())? {
            Submission::Create(payload) => {
                let record = self.repo.create(token, &payload).await.inspect_err(|e| {
                    warn!(error = %e, "Block seat create failed");
                })?;
                info!(id = %record.id, "Block seat created");
                SaveOutcome::Created { record }
            }
            Submission::Update { id, changes } => {
                let fields: Vec<&str> = changes.keys().map(String::as_str).collect();
                let record = self.repo.update(token, &id, &changes).await.inspect_err(|e| {
                    warn!(id = %id, error = %e, "Block seat update failed");
                })?;
                info!(id = %record.id, ?fields, "Block seat updated");
                SaveOutcome::Updated { record }
            }
            Submission::Unchanged { id } => {
                debug!(id = %id, "No changes to save");
                SaveOutcome::Unchanged { id }
            }
        };

        if let SaveOutcome::Created { record } | SaveOutcome::Updated { record } = &outcome {
            form.merge_saved(record);
        }
        Ok(outcome)
    }

    pub async fn delete(&self, token: &AuthToken, id: &str) -> CoreResult<()> {
        self.repo.delete(token, id).await?;
        info!(id = %id, "Block seat deleted");
        Ok(())
    }
}
