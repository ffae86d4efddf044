use serde::Deserialize;

use crate::models::{Booking, BookingStatus, VisaAppointment, VisaStatus};

/// Listing filter for the bookings tables. Both fields are optional; an empty
/// filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

impl BookingFilter {
    /// Free-text search matches the booking reference, the lead traveler's
    /// name or the contact email, case-insensitively.
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }

        let Some(needle) = normalized(&self.search) else {
            return true;
        };

        let lead = booking
            .lead_traveler()
            .map(|t| t.full_name())
            .unwrap_or_default();

        [booking.reference.as_str(), lead.as_str(), booking.contact.email.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply(&self, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.into_iter().filter(|b| self.matches(b)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaFilter {
    #[serde(default)]
    pub status: Option<VisaStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

impl VisaFilter {
    pub fn matches(&self, appointment: &VisaAppointment) -> bool {
        if let Some(status) = self.status {
            if appointment.status != status {
                return false;
            }
        }

        let Some(needle) = normalized(&self.search) else {
            return true;
        };

        let applicant = appointment.applicant.full_name();
        [
            appointment.reference.as_str(),
            applicant.as_str(),
            appointment.destination_country.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply(&self, appointments: Vec<VisaAppointment>) -> Vec<VisaAppointment> {
        appointments.into_iter().filter(|a| self.matches(a)).collect()
    }
}

fn normalized(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn booking(reference: &str, status: &str, first: &str, last: &str) -> Booking {
        serde_json::from_value(json!({
            "_id": reference.to_lowercase(),
            "reference": reference,
            "status": status,
            "contact": { "email": format!("{}@example.com", first.to_lowercase()) },
            "travelers": [{ "firstName": first, "lastName": last }],
            "pricing": { "currency": "USD", "fare": { "adult": 1000 } }
        }))
        .unwrap()
    }

    fn sample() -> Vec<Booking> {
        vec![
            booking("PK-001", "PENDING", "Amal", "Haddad"),
            booking("PK-002", "CONFIRMED", "John", "Smith"),
            booking("PK-003", "PENDING", "Sara", "Khan"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        assert_eq!(BookingFilter::default().apply(sample()).len(), 3);

        let blank = BookingFilter {
            status: None,
            search: Some("   ".to_string()),
        };
        assert_eq!(blank.apply(sample()).len(), 3);
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let pending = BookingFilter {
            status: Some(BookingStatus::Pending),
            search: None,
        };
        assert_eq!(pending.apply(sample()).len(), 2);

        let by_name = BookingFilter {
            status: Some(BookingStatus::Pending),
            search: Some("khan".to_string()),
        };
        let found = by_name.apply(sample());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reference, "PK-003");

        let by_reference = BookingFilter {
            status: None,
            search: Some("pk-002".to_string()),
        };
        assert_eq!(by_reference.apply(sample())[0].status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_visa_filter() {
        let appointment: VisaAppointment = serde_json::from_value(json!({
            "_id": "va-1",
            "reference": "VA-1",
            "applicant": { "firstName": "Omar", "lastName": "Haddad" },
            "destinationCountry": "United Kingdom",
            "status": "IN_REVIEW"
        }))
        .unwrap();

        let filter = VisaFilter {
            status: Some(VisaStatus::InReview),
            search: Some("kingdom".to_string()),
        };
        assert!(filter.matches(&appointment));

        let approved = VisaFilter {
            status: Some(VisaStatus::Approved),
            search: None,
        };
        assert!(!approved.matches(&appointment));
    }
}
