use serde_json::{Map, Value};

use crate::form::InventoryForm;
use crate::inventory::{Airline, BlockSeatPayload, BlockSeatRecord, Route, TripType};
use crate::pricing::PricingError;
use crate::stoppage::MAX_STOPS;
use crate::validation::{check_entry, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("Airline code is required")]
    MissingAirline,

    #[error("At least one origin and one destination airport are required")]
    MissingRoute,

    #[error("Add at least one available date")]
    NoAvailableDates,

    #[error("Configure at least one cabin class")]
    NoCabinClasses,

    #[error("A date entry can have at most {} stops per leg", MAX_STOPS)]
    TooManyStops,

    #[error(transparent)]
    InvalidDate(#[from] ValidationError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Failed to encode payload: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// What to send to the backend for a form submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// New record: POST the whole payload.
    Create(Value),
    /// Existing record: PUT only the fields that changed.
    Update { id: String, changes: Map<String, Value> },
    /// Existing record with nothing to send.
    Unchanged { id: String },
}

/// Normalized backend payload for the form's current state.
///
/// Airport codes are trimmed, upper-cased and de-duplicated in order; the
/// airline code is upper-cased; one-way blocks carry no return data.
pub fn assemble(form: &InventoryForm) -> BlockSeatPayload {
    let round_trip = form.route.trip_type == TripType::RoundTrip;

    let available_dates = form
        .available_dates()
        .iter()
        .map(|entry| if round_trip { entry.clone() } else { entry.without_return() })
        .collect();

    BlockSeatPayload {
        airline: Airline {
            code: form.airline.code.trim().to_uppercase(),
            name: form.airline.name.trim().to_string(),
        },
        route: Route {
            trip_type: form.route.trip_type,
            origin_airports: normalize_airports(&form.route.origin_airports),
            destination_airports: normalize_airports(&form.route.destination_airports),
        },
        available_dates,
        classes: form.classes.clone(),
        status: form.status,
    }
}

fn normalize_airports(codes: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_uppercase();
        if !code.is_empty() && !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

/// Field rules checked before anything is sent.
pub fn check_payload(payload: &BlockSeatPayload) -> Result<(), AssembleError> {
    if payload.airline.code.is_empty() {
        return Err(AssembleError::MissingAirline);
    }
    if payload.route.origin_airports.is_empty() || payload.route.destination_airports.is_empty() {
        return Err(AssembleError::MissingRoute);
    }
    if payload.available_dates.is_empty() {
        return Err(AssembleError::NoAvailableDates);
    }
    let round_trip = payload.route.trip_type == TripType::RoundTrip;
    for entry in &payload.available_dates {
        if entry.outbound_stops().len() > MAX_STOPS || entry.return_stops().len() > MAX_STOPS {
            return Err(AssembleError::TooManyStops);
        }
        check_entry(entry, round_trip)?;
    }
    if payload.classes.is_empty() {
        return Err(AssembleError::NoCabinClasses);
    }
    for (class, config) in &payload.classes {
        config.validate(*class)?;
    }
    Ok(())
}

/// Structural diff of two JSON objects, in merge-patch form.
///
/// Keys whose value equals the original are skipped; nested objects are
/// diffed recursively and kept only when something inside changed; arrays
/// and scalars are replaced wholesale. A key present only in `original` is
/// reported as `null`, meaning "remove".
pub fn diff(original: &Value, updated: &Value) -> Map<String, Value> {
    let mut changes = Map::new();
    let Some(updated) = updated.as_object() else {
        return changes;
    };
    let empty = Map::new();
    let original = original.as_object().unwrap_or(&empty);

    for (key, new_value) in updated {
        match original.get(key) {
            Some(old_value) if old_value == new_value => {}
            Some(old_value) if old_value.is_object() && new_value.is_object() => {
                let nested = diff(old_value, new_value);
                if !nested.is_empty() {
                    changes.insert(key.clone(), Value::Object(nested));
                }
            }
            _ => {
                changes.insert(key.clone(), new_value.clone());
            }
        }
    }

    for key in original.keys() {
        if !updated.contains_key(key) {
            changes.insert(key.clone(), Value::Null);
        }
    }

    changes
}

/// Turn a form into the request to make. `original` is the stored record
/// when editing.
pub fn prepare_submission(
    form: &InventoryForm,
    original: Option<&BlockSeatRecord>,
) -> Result<Submission, AssembleError> {
    let payload = assemble(form);
    check_payload(&payload)?;
    let updated = serde_json::to_value(&payload)?;

    let Some(original) = original else {
        return Ok(Submission::Create(updated));
    };

    let baseline = serde_json::to_value(assemble(&InventoryForm::from_record(original)))?;
    let changes = diff(&baseline, &updated);
    if changes.is_empty() {
        Ok(Submission::Unchanged {
            id: original.id.clone(),
        })
    } else {
        Ok(Submission::Update {
            id: original.id.clone(),
            changes,
        })
    }
}
