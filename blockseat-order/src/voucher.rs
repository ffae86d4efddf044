use blockseat_shared::{calculate_duration, TimePoint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, PassengerType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Voucher,
    Invoice,
}

impl DocumentKind {
    fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Voucher => "VCH",
            DocumentKind::Invoice => "INV",
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = VoucherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voucher" => Ok(DocumentKind::Voucher),
            "invoice" => Ok(DocumentKind::Invoice),
            other => Err(VoucherError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTraveler {
    pub name: String,
    pub passenger_type: PassengerType,
}

/// One segment of the trip as printed on the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryLine {
    pub label: String,
    pub starts_at: TimePoint,
    pub ends_at: TimePoint,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub amount: i64,
}

/// Everything the renderer needs to print a voucher or an invoice. Amounts
/// are in minor units of `currency`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherDocument {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub number: String,
    pub issued_at: DateTime<Utc>,
    pub booking_id: String,
    pub booking_reference: String,
    pub booking_status: BookingStatus,
    pub agency: Option<String>,
    pub contact_email: String,
    pub travelers: Vec<DocumentTraveler>,
    pub itinerary: Vec<ItineraryLine>,
    pub line_items: Vec<LineItem>,
    pub currency: String,
    pub subtotal: i64,
    pub extras: i64,
    pub commission: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoucherError {
    #[error("Vouchers are only issued for confirmed or completed bookings (booking is {0:?})")]
    NotIssuable(BookingStatus),

    #[error("Booking {0} has no travelers")]
    NoTravelers(String),

    #[error("Unknown document kind: {0}")]
    UnknownKind(String),

    #[error("Amounts for booking {0} are out of range")]
    AmountOverflow(String),
}

/// Builds voucher and invoice documents from bookings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentGenerator;

impl DocumentGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, kind: DocumentKind, booking: &Booking) -> Result<VoucherDocument, VoucherError> {
        self.generate_at(kind, booking, Utc::now())
    }

    pub fn generate_at(
        &self,
        kind: DocumentKind,
        booking: &Booking,
        issued_at: DateTime<Utc>,
    ) -> Result<VoucherDocument, VoucherError> {
        if kind == DocumentKind::Voucher && !booking.status.allows_voucher() {
            return Err(VoucherError::NotIssuable(booking.status));
        }
        if booking.travelers.is_empty() {
            return Err(VoucherError::NoTravelers(booking.reference.clone()));
        }

        let overflow = || VoucherError::AmountOverflow(booking.reference.clone());

        let (adults, children, infants) = booking.passenger_counts();
        let fare = &booking.pricing.fare;
        let line_items = [
            ("Adult fare", adults, fare.adult),
            ("Child fare", children, fare.child),
            ("Infant fare", infants, fare.infant),
        ]
        .into_iter()
        .filter(|(_, quantity, _)| *quantity > 0)
        .map(|(description, quantity, unit_price)| -> Result<LineItem, VoucherError> {
            let amount = unit_price.checked_mul(i64::from(quantity)).ok_or_else(overflow)?;
            Ok(LineItem {
                description: description.to_string(),
                quantity,
                unit_price,
                amount,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

        let subtotal = line_items
            .iter()
            .try_fold(0i64, |sum, item| sum.checked_add(item.amount))
            .ok_or_else(overflow)?;
        let commission = booking
            .pricing
            .commission
            .amount_on(subtotal, adults + children + infants);
        let extras = booking.pricing.extras;
        let total = subtotal
            .checked_add(extras)
            .and_then(|gross| gross.checked_sub(commission))
            .ok_or_else(overflow)?;

        Ok(VoucherDocument {
            id: Uuid::new_v4(),
            kind,
            number: document_number(kind, &booking.id, issued_at),
            issued_at,
            booking_id: booking.id.clone(),
            booking_reference: booking.reference.clone(),
            booking_status: booking.status,
            agency: booking.agency.as_ref().map(|a| a.name.clone()),
            contact_email: booking.contact.email.clone(),
            travelers: booking
                .travelers
                .iter()
                .map(|t| DocumentTraveler {
                    name: t.full_name(),
                    passenger_type: t.passenger_type,
                })
                .collect(),
            itinerary: itinerary(booking),
            line_items,
            currency: booking.pricing.currency.clone(),
            subtotal,
            extras,
            commission,
            total,
        })
    }
}

// Format: {PREFIX}-{timestamp}-{short booking id}
fn document_number(kind: DocumentKind, booking_id: &str, issued_at: DateTime<Utc>) -> String {
    let short_id: String = booking_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect();
    format!("{}-{}-{}", kind.prefix(), issued_at.timestamp(), short_id.to_uppercase())
}

fn itinerary(booking: &Booking) -> Vec<ItineraryLine> {
    let mut lines = Vec::new();

    if let Some(flight) = &booking.flight {
        let number = flight.flight_number.as_deref().unwrap_or("");
        let carrier = format!("{} {}", flight.airline, number).trim().to_string();
        lines.push(ItineraryLine {
            label: format!("{} {} → {}", carrier, flight.origin, flight.destination),
            starts_at: flight.departure,
            ends_at: flight.arrival,
            duration: calculate_duration(&flight.departure, &flight.arrival),
        });
        if flight.return_departure.is_set() {
            lines.push(ItineraryLine {
                label: format!("{} {} → {}", carrier, flight.destination, flight.origin),
                starts_at: flight.return_departure,
                ends_at: flight.return_arrival,
                duration: calculate_duration(&flight.return_departure, &flight.return_arrival),
            });
        }
    }

    if let Some(package) = &booking.package {
        let label = if package.destination.is_empty() {
            format!("{} ({} nights)", package.title, package.nights)
        } else {
            format!("{}, {} ({} nights)", package.title, package.destination, package.nights)
        };
        lines.push(ItineraryLine {
            label,
            starts_at: package.start_date,
            ends_at: package.end_date,
            duration: calculate_duration(&package.start_date, &package.end_date),
        });
    }

    lines
}
