use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dates::FlightDateEntry;
use crate::pricing::{CabinClass, ClassConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    #[default]
    Active,
    Inactive,
    SoldOut,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub code: String,
    pub name: String,
}

/// Where the block flies. Both ends are sets of airport codes so one block
/// can cover e.g. all London airports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub trip_type: TripType,
    #[serde(default)]
    pub origin_airports: Vec<String>,
    #[serde(default)]
    pub destination_airports: Vec<String>,
}

/// Request body for creating or replacing a block-seat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSeatPayload {
    pub airline: Airline,
    pub route: Route,
    #[serde(default)]
    pub available_dates: Vec<FlightDateEntry>,
    #[serde(default)]
    pub classes: BTreeMap<CabinClass, ClassConfig>,
    #[serde(default)]
    pub status: InventoryStatus,
}

/// A wholesaler's seat allotment as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSeatRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub payload: BlockSeatPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlockSeatRecord {
    /// Earliest departure among the available dates. Derived on demand; the
    /// date list is the only place dates are stored.
    pub fn first_available_date(&self) -> Option<&FlightDateEntry> {
        self.payload
            .available_dates
            .iter()
            .filter_map(|entry| entry.departure().instant().map(|at| (at, entry)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, entry)| entry)
    }

    pub fn seats_available(&self) -> u32 {
        self.payload.classes.values().map(|c| c.available_seats).sum()
    }

    pub fn is_round_trip(&self) -> bool {
        self.payload.route.trip_type == TripType::RoundTrip
    }

    /// Short label for lists, e.g. `"EK DXB,SHJ → LHR"`.
    pub fn route_label(&self) -> String {
        format!(
            "{} {} → {}",
            self.payload.airline.code,
            self.payload.route.origin_airports.join(","),
            self.payload.route.destination_airports.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "_id": "bs-101",
        "airline": { "code": "EK", "name": "Emirates" },
        "route": { "tripType": "ONE_WAY", "originAirports": ["DXB"], "destinationAirports": ["LHR", "LGW"] },
        "availableDates": [
            { "id": "d2", "departure": "2025-12-02T09:00:00.000Z", "arrival": "2025-12-02T13:00:00.000Z", "deadline": "2025-11-25" },
            { "id": "d1", "departure": "2025-11-02T09:00:00.000Z", "arrival": "2025-11-02T13:00:00.000Z", "deadline": "2025-10-25" }
        ],
        "classes": {
            "ECONOMY": { "fare": { "adult": 45000 }, "currency": "USD", "totalSeats": 40, "availableSeats": 12 },
            "BUSINESS": { "fare": { "adult": 180000 }, "currency": "USD", "totalSeats": 8, "availableSeats": 3 }
        },
        "status": "ACTIVE",
        "createdAt": "2025-09-01T08:00:00Z"
    }"#;

    #[test]
    fn test_record_decodes_backend_shape() {
        let record: BlockSeatRecord = serde_json::from_str(RECORD).unwrap();
        assert_eq!(record.id, "bs-101");
        assert_eq!(record.payload.available_dates.len(), 2);
        assert_eq!(record.seats_available(), 15);
        assert!(!record.is_round_trip());
        assert_eq!(record.route_label(), "EK DXB → LHR,LGW");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_first_available_date_is_derived() {
        let record: BlockSeatRecord = serde_json::from_str(RECORD).unwrap();
        assert_eq!(record.first_available_date().map(|d| d.id()), Some("d1"));
    }
}
