use serde::{Deserialize, Serialize};

/// Response wrapper used by every backend endpoint: `{ success, data, message }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

/// Booking lists arrive nested one level deeper: `{ data: { bookings: [...] } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsPage<T> {
    #[serde(default = "Vec::new")]
    pub bookings: Vec<T>,
}

/// Pull a human-readable message out of an error body, if it carries one.
///
/// Looks at `message` first, then `error`; anything else yields `None` so the
/// caller can fall back to a generic text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
