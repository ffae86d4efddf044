//! In-memory repositories for local runs and tests. Each one counts the
//! writes it receives so callers can assert that no request was made.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use blockseat_catalog::{BlockSeatPayload, BlockSeatRecord};
use blockseat_order::{Booking, BookingKind, BookingStatus, VisaAppointment, VisaStatus};
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::identity::AuthToken;
use crate::repository::{BlockSeatRepository, BookingRepository, VisaRepository};
use crate::{CoreError, CoreResult};

#[derive(Default)]
pub struct InMemoryBlockSeats {
    records: RwLock<Vec<BlockSeatRecord>>,
    next_id: AtomicUsize,
    writes: AtomicUsize,
    last_changes: RwLock<Option<Map<String, Value>>>,
    fail_next: RwLock<Option<(u16, String)>>,
}

impl InMemoryBlockSeats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BlockSeatRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Number of create/update/delete calls received.
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn last_changes(&self) -> Option<Map<String, Value>> {
        self.last_changes.read().await.clone()
    }

    /// Make the next write fail the way the backend would.
    pub async fn fail_next_write(&self, status: u16, message: &str) {
        *self.fail_next.write().await = Some((status, message.to_string()));
    }

    async fn begin_write(&self) -> CoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.fail_next.write().await.take() {
            Some((status, message)) => Err(CoreError::Backend { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BlockSeatRepository for InMemoryBlockSeats {
    async fn list(&self, _token: &AuthToken) -> CoreResult<Vec<BlockSeatRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, _token: &AuthToken, payload: &Value) -> CoreResult<BlockSeatRecord> {
        self.begin_write().await?;
        let payload: BlockSeatPayload =
            serde_json::from_value(payload.clone()).map_err(|e| CoreError::Decode(e.to_string()))?;
        let record = BlockSeatRecord {
            id: format!("bs-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            payload,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        _token: &AuthToken,
        id: &str,
        changes: &Map<String, Value>,
    ) -> CoreResult<BlockSeatRecord> {
        self.begin_write().await?;
        *self.last_changes.write().await = Some(changes.clone());

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::Backend {
                status: 404,
                message: "Block seat not found".to_string(),
            })?;

        let mut current =
            serde_json::to_value(&record.payload).map_err(|e| CoreError::Internal(e.to_string()))?;
        merge(&mut current, changes);
        record.payload = serde_json::from_value(current).map_err(|e| CoreError::Decode(e.to_string()))?;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, _token: &AuthToken, id: &str) -> CoreResult<()> {
        self.begin_write().await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(CoreError::Backend {
                status: 404,
                message: "Block seat not found".to_string(),
            });
        }
        Ok(())
    }
}

// Objects merge key by key; anything else replaces.
fn merge(target: &mut Value, changes: &Map<String, Value>) {
    let Some(target) = target.as_object_mut() else {
        return;
    };
    for (key, value) in changes {
        if value.is_null() {
            target.remove(key);
            continue;
        }
        if let (Some(existing), Value::Object(nested)) = (target.get_mut(key), value) {
            if existing.is_object() {
                merge(existing, nested);
                continue;
            }
        }
        target.insert(key.clone(), value.clone());
    }
}

#[derive(Default)]
pub struct InMemoryBookings {
    bookings: RwLock<HashMap<BookingKind, Vec<Booking>>>,
    writes: AtomicUsize,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, kind: BookingKind, booking: Booking) {
        self.bookings.write().await.entry(kind).or_default().push(booking);
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn list(&self, _token: &AuthToken, kind: BookingKind) -> CoreResult<Vec<Booking>> {
        Ok(self.bookings.read().await.get(&kind).cloned().unwrap_or_default())
    }

    async fn update_status(
        &self,
        _token: &AuthToken,
        kind: BookingKind,
        id: &str,
        status: BookingStatus,
    ) -> CoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .get_mut(&kind)
            .and_then(|list| list.iter_mut().find(|b| b.id == id))
            .ok_or_else(|| CoreError::Backend {
                status: 404,
                message: "Booking not found".to_string(),
            })?;
        booking.status = status;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryVisas {
    appointments: RwLock<Vec<VisaAppointment>>,
    writes: AtomicUsize,
}

impl InMemoryVisas {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, appointment: VisaAppointment) {
        self.appointments.write().await.push(appointment);
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisaRepository for InMemoryVisas {
    async fn list(&self, _token: &AuthToken) -> CoreResult<Vec<VisaAppointment>> {
        Ok(self.appointments.read().await.clone())
    }

    async fn update_status(&self, _token: &AuthToken, id: &str, status: VisaStatus) -> CoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::Backend {
                status: 404,
                message: "Visa appointment not found".to_string(),
            })?;
        appointment.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_nested_changes() {
        let mut target = json!({
            "airline": { "code": "EK", "name": "Emirates" },
            "route": { "originAirports": ["DXB"] }
        });
        let changes = json!({
            "airline": { "name": "Emirates Airline" },
            "route": { "originAirports": ["SHJ"] }
        });
        merge(&mut target, changes.as_object().unwrap());
        assert_eq!(
            target,
            json!({
                "airline": { "code": "EK", "name": "Emirates Airline" },
                "route": { "originAirports": ["SHJ"] }
            })
        );
    }

    #[test]
    fn test_merge_null_removes_key() {
        let mut target = json!({
            "classes": { "ECONOMY": { "totalSeats": 40 }, "BUSINESS": { "totalSeats": 8 } }
        });
        let changes = json!({ "classes": { "BUSINESS": null } });
        merge(&mut target, changes.as_object().unwrap());
        assert_eq!(target, json!({ "classes": { "ECONOMY": { "totalSeats": 40 } } }));
    }
}
