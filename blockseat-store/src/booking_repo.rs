use async_trait::async_trait;
use blockseat_core::{AuthToken, BookingRepository, CoreResult};
use blockseat_order::{Booking, BookingKind, BookingStatus};
use blockseat_shared::BookingsPage;
use reqwest::Method;
use serde_json::json;

use crate::http::BackendClient;

/// Package bookings (`/packages/bookings`) and block-seat bookings
/// (`/block-seats/bookings`) on the backend service.
pub struct HttpBookingRepository {
    client: BackendClient,
}

impl HttpBookingRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingRepository for HttpBookingRepository {
    async fn list(&self, token: &AuthToken, kind: BookingKind) -> CoreResult<Vec<Booking>> {
        let page: BookingsPage<Booking> = self.client.get(token, kind.collection_path()).await?;
        Ok(page.bookings)
    }

    async fn update_status(
        &self,
        token: &AuthToken,
        kind: BookingKind,
        id: &str,
        status: BookingStatus,
    ) -> CoreResult<()> {
        let path = format!("{}/{}", kind.collection_path(), id);
        let body = json!({ "status": status });
        self.client.send_unit(Method::PATCH, token, &path, Some(&body)).await
    }
}
