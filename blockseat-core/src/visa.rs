use std::sync::Arc;

use blockseat_order::{VisaAppointment, VisaFilter, VisaStatus};
use tracing::{info, warn};

use crate::identity::AuthToken;
use crate::repository::VisaRepository;
use crate::{CoreError, CoreResult};

#[derive(Clone)]
pub struct VisaService {
    repo: Arc<dyn VisaRepository>,
}

impl VisaService {
    pub fn new(repo: Arc<dyn VisaRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, token: &AuthToken, filter: &VisaFilter) -> CoreResult<Vec<VisaAppointment>> {
        Ok(filter.apply(self.repo.list(token).await?))
    }

    pub async fn change_status(
        &self,
        token: &AuthToken,
        id: &str,
        next: VisaStatus,
    ) -> CoreResult<VisaAppointment> {
        let mut appointment = self
            .repo
            .list(token)
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("visa appointment {}", id)))?;
        appointment.status.ensure_transition(next)?;

        self.repo
            .update_status(token, id, next)
            .await
            .inspect_err(|e| warn!(id, error = %e, "Visa status update failed"))?;

        info!(id, from = ?appointment.status, to = ?next, "Visa appointment status changed");
        appointment.status = next;
        Ok(appointment)
    }
}
