use async_trait::async_trait;
use blockseat_catalog::BlockSeatRecord;
use blockseat_order::{Booking, BookingKind, BookingStatus, VisaAppointment, VisaStatus};
use serde_json::{Map, Value};

use crate::identity::AuthToken;
use crate::CoreResult;

/// Block-seat inventory on the flight service.
#[async_trait]
pub trait BlockSeatRepository: Send + Sync {
    async fn list(&self, token: &AuthToken) -> CoreResult<Vec<BlockSeatRecord>>;

    /// POST the full payload. Returns the stored record.
    async fn create(&self, token: &AuthToken, payload: &Value) -> CoreResult<BlockSeatRecord>;

    /// PUT only the changed fields.
    async fn update(
        &self,
        token: &AuthToken,
        id: &str,
        changes: &Map<String, Value>,
    ) -> CoreResult<BlockSeatRecord>;

    async fn delete(&self, token: &AuthToken, id: &str) -> CoreResult<()>;
}

/// Package and block-seat booking requests on the backend service.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self, token: &AuthToken, kind: BookingKind) -> CoreResult<Vec<Booking>>;

    async fn update_status(
        &self,
        token: &AuthToken,
        kind: BookingKind,
        id: &str,
        status: BookingStatus,
    ) -> CoreResult<()>;
}

#[async_trait]
pub trait VisaRepository: Send + Sync {
    async fn list(&self, token: &AuthToken) -> CoreResult<Vec<VisaAppointment>>;

    async fn update_status(&self, token: &AuthToken, id: &str, status: VisaStatus) -> CoreResult<()>;
}
