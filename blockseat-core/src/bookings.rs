use std::sync::Arc;

use blockseat_order::{
    Booking, BookingFilter, BookingKind, BookingStatus, DocumentGenerator, DocumentKind, DocumentRenderer,
    RenderedDocument,
};
use tracing::{info, warn};

use crate::identity::AuthToken;
use crate::repository::BookingRepository;
use crate::{CoreError, CoreResult};

/// Booking request review: listing, status changes and documents.
#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    renderer: Arc<dyn DocumentRenderer>,
    generator: DocumentGenerator,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            repo,
            renderer,
            generator: DocumentGenerator::new(),
        }
    }

    pub async fn list(
        &self,
        token: &AuthToken,
        kind: BookingKind,
        filter: &BookingFilter,
    ) -> CoreResult<Vec<Booking>> {
        let bookings = self.repo.list(token, kind).await?;
        Ok(filter.apply(bookings))
    }

    pub async fn find(&self, token: &AuthToken, kind: BookingKind, id: &str) -> CoreResult<Booking> {
        self.repo
            .list(token, kind)
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("{} booking {}", kind, id)))
    }

    /// Move a booking to `next`. Transitions the lifecycle does not allow are
    /// rejected before the backend is called.
    pub async fn change_status(
        &self,
        token: &AuthToken,
        kind: BookingKind,
        id: &str,
        next: BookingStatus,
    ) -> CoreResult<Booking> {
        let mut booking = self.find(token, kind, id).await?;
        booking.status.ensure_transition(next)?;

        self.repo
            .update_status(token, kind, id, next)
            .await
            .inspect_err(|e| warn!(%kind, id, error = %e, "Booking status update failed"))?;

        info!(%kind, id, from = ?booking.status, to = ?next, "Booking status changed");
        booking.status = next;
        Ok(booking)
    }

    pub async fn document(
        &self,
        token: &AuthToken,
        kind: BookingKind,
        id: &str,
        document: DocumentKind,
    ) -> CoreResult<RenderedDocument> {
        let booking = self.find(token, kind, id).await?;
        let assembled = self.generator.generate(document, &booking)?;
        let rendered = self.renderer.render(&assembled)?;
        info!(number = %assembled.number, booking = %booking.reference, "Document generated");
        Ok(rendered)
    }
}
