use crate::models::{BookingStatus, VisaStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl BookingStatus {
    /// `PENDING` can be confirmed, rejected or cancelled; `CONFIRMED` can be
    /// cancelled or completed. Everything else is final.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Rejected) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed
        )
    }

    pub fn ensure_transition(&self, next: BookingStatus) -> Result<(), StatusError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(StatusError::InvalidTransition {
                from: status_label(self),
                to: status_label(&next),
            })
        }
    }

    /// Statuses that carry a travel voucher.
    pub fn allows_voucher(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Completed)
    }
}

impl VisaStatus {
    pub fn can_transition_to(&self, next: VisaStatus) -> bool {
        use VisaStatus::*;
        match self {
            Pending => matches!(next, InReview | Approved | Rejected),
            InReview => matches!(next, Approved | Rejected),
            Approved | Rejected => false,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, VisaStatus::Approved | VisaStatus::Rejected)
    }

    pub fn ensure_transition(&self, next: VisaStatus) -> Result<(), StatusError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(StatusError::InvalidTransition {
                from: status_label(self),
                to: status_label(&next),
            })
        }
    }
}

fn status_label<T: serde::Serialize>(status: &T) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
