use blockseat_catalog::{CabinClass, Commission, Fare};
use blockseat_shared::{Masked, TimePoint};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two booking feeds a wholesaler manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Package,
    Flight,
}

impl BookingKind {
    /// Backend collection path for this kind.
    pub fn collection_path(&self) -> &'static str {
        match self {
            BookingKind::Package => "/packages/bookings",
            BookingKind::Flight => "/block-seats/bookings",
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingKind::Package => f.write_str("package"),
            BookingKind::Flight => f.write_str("flight"),
        }
    }
}

/// Booking request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerType {
    #[default]
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveler {
    #[serde(default)]
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub passenger_type: PassengerType,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<Masked<String>>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Traveler {
    pub fn full_name(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {
                format!("{} {} {}", title.trim(), self.first_name.trim(), self.last_name.trim())
            }
            _ => format!("{} {}", self.first_name.trim(), self.last_name.trim()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

/// Package details carried by package bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub start_date: TimePoint,
    #[serde(default)]
    pub end_date: TimePoint,
}

/// Flight details carried by block-seat bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    pub block_seat_id: String,
    pub airline: String,
    #[serde(default)]
    pub flight_number: Option<String>,
    pub origin: String,
    pub destination: String,
    pub cabin_class: CabinClass,
    pub departure: TimePoint,
    pub arrival: TimePoint,
    #[serde(default)]
    pub return_departure: TimePoint,
    #[serde(default)]
    pub return_arrival: TimePoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPricing {
    pub currency: String,
    pub fare: Fare,
    #[serde(default)]
    pub commission: Commission,
    /// Taxes, visa fees and other extras, in minor units.
    #[serde(default)]
    pub extras: i64,
}

/// A package or block-seat booking request as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub reference: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub agency: Option<AgencyRef>,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub travelers: Vec<Traveler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightSummary>,
    pub pricing: BookingPricing,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn kind(&self) -> BookingKind {
        if self.flight.is_some() {
            BookingKind::Flight
        } else {
            BookingKind::Package
        }
    }

    pub fn passenger_counts(&self) -> (u32, u32, u32) {
        self.travelers.iter().fold((0, 0, 0), |(a, c, i), t| match t.passenger_type {
            PassengerType::Adult => (a + 1, c, i),
            PassengerType::Child => (a, c + 1, i),
            PassengerType::Infant => (a, c, i + 1),
        })
    }

    pub fn lead_traveler(&self) -> Option<&Traveler> {
        self.travelers.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaAppointment {
    #[serde(alias = "_id")]
    pub id: String,
    pub reference: String,
    pub applicant: Traveler,
    pub destination_country: String,
    #[serde(default)]
    pub visa_type: String,
    #[serde(default)]
    pub appointment_at: TimePoint,
    pub status: VisaStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIGHT_BOOKING: &str = r#"{
        "_id": "bk-77",
        "reference": "BS-2025-0077",
        "status": "PENDING",
        "agency": { "_id": "ag-1", "name": "Sunrise Travel" },
        "contact": { "name": "Amal Haddad", "email": "amal@example.com", "phone": "+971500000000" },
        "travelers": [
            { "title": "Ms", "firstName": "Amal", "lastName": "Haddad", "passengerType": "ADULT", "passportNumber": "N1234567" },
            { "firstName": "Omar", "lastName": "Haddad", "passengerType": "CHILD" },
            { "firstName": "Lina", "lastName": "Haddad", "passengerType": "INFANT" }
        ],
        "flight": {
            "blockSeatId": "bs-101",
            "airline": "EK",
            "origin": "DXB",
            "destination": "LHR",
            "cabinClass": "ECONOMY",
            "departure": "2025-11-02T09:00:00.000Z",
            "arrival": "2025-11-02T13:00:00.000Z"
        },
        "pricing": {
            "currency": "USD",
            "fare": { "adult": 45000, "child": 38000, "infant": 5000 },
            "commission": { "type": "PERCENTAGE", "value": 5 },
            "extras": 2000
        }
    }"#;

    #[test]
    fn test_booking_decodes_and_counts() {
        let booking: Booking = serde_json::from_str(FLIGHT_BOOKING).unwrap();
        assert_eq!(booking.kind(), BookingKind::Flight);
        assert_eq!(booking.passenger_counts(), (1, 1, 1));
        assert_eq!(booking.lead_traveler().unwrap().full_name(), "Ms Amal Haddad");
        let passport = booking.travelers[0].passport_number.as_ref().unwrap();
        assert_eq!(format!("{:?}", passport), "********");
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(BookingKind::Package.collection_path(), "/packages/bookings");
        assert_eq!(BookingKind::Flight.collection_path(), "/block-seats/bookings");
        assert_eq!(serde_json::to_value(BookingKind::Flight).unwrap(), serde_json::json!("flight"));
    }
}
