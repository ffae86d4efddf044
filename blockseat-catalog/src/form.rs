use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::builder::{BuilderError, DateEntryBuilder, DraftAction, ToggleOutcome};
use crate::dates::FlightDateEntry;
use crate::inventory::{Airline, BlockSeatRecord, InventoryStatus, Route, TripType};
use crate::pricing::{CabinClass, ClassConfig};

/// Every mutation the inventory form accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormAction {
    SetAirline { airline: Airline },
    SetTripType { trip_type: TripType },
    SetOrigins { airports: Vec<String> },
    SetDestinations { airports: Vec<String> },
    SetClass { class: CabinClass, config: ClassConfig },
    RemoveClass { class: CabinClass },
    SetStatus { status: InventoryStatus },
    OpenDateEntry,
    EditDraft { action: DraftAction },
    SaveDateEntry,
    CancelDateEntry,
    ToggleDateEntry,
    RemoveDate { id: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error("Date entry not found: {0}")]
    DateNotFound(String),

    #[error("Cabin class not configured: {0:?}")]
    ClassNotFound(CabinClass),
}

/// Full state of the create/edit block-seat screen.
///
/// Owned in one place and changed only through [`InventoryForm::apply`], so the
/// builder's trip shape always follows the route's trip type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub airline: Airline,
    #[serde(default)]
    pub route: Route,
    #[serde(default)]
    pub classes: BTreeMap<CabinClass, ClassConfig>,
    #[serde(default)]
    pub status: InventoryStatus,
    #[serde(default)]
    available_dates: Vec<FlightDateEntry>,
    #[serde(skip)]
    builder: DateEntryBuilder,
}

impl InventoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored record, for editing.
    pub fn from_record(record: &BlockSeatRecord) -> Self {
        let payload = &record.payload;
        Self {
            id: Some(record.id.clone()),
            airline: payload.airline.clone(),
            route: payload.route.clone(),
            classes: payload.classes.clone(),
            status: payload.status,
            available_dates: payload.available_dates.clone(),
            builder: DateEntryBuilder::new(payload.route.trip_type == TripType::RoundTrip),
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.route.trip_type == TripType::RoundTrip
    }

    pub fn available_dates(&self) -> &[FlightDateEntry] {
        &self.available_dates
    }

    pub fn first_available_date(&self) -> Option<&FlightDateEntry> {
        self.available_dates
            .iter()
            .filter_map(|entry| entry.departure().instant().map(|at| (at, entry)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, entry)| entry)
    }

    pub fn builder(&self) -> &DateEntryBuilder {
        &self.builder
    }

    /// The single write path into the form.
    pub fn apply(&mut self, action: FormAction) -> Result<(), FormError> {
        self.sync_builder();

        match action {
            FormAction::SetAirline { airline } => self.airline = airline,
            FormAction::SetTripType { trip_type } => {
                self.route.trip_type = trip_type;
                self.sync_builder();
            }
            FormAction::SetOrigins { airports } => self.route.origin_airports = airports,
            FormAction::SetDestinations { airports } => self.route.destination_airports = airports,
            FormAction::SetClass { class, config } => {
                self.classes.insert(class, config);
            }
            FormAction::RemoveClass { class } => {
                self.classes.remove(&class).ok_or(FormError::ClassNotFound(class))?;
            }
            FormAction::SetStatus { status } => self.status = status,
            FormAction::OpenDateEntry => self.builder.open(),
            FormAction::EditDraft { action } => self.builder.apply(action)?,
            FormAction::SaveDateEntry => {
                self.builder.save(&mut self.available_dates)?;
            }
            FormAction::CancelDateEntry => self.builder.cancel(),
            FormAction::ToggleDateEntry => {
                if let ToggleOutcome::Saved(id) = self.builder.toggle(&mut self.available_dates) {
                    debug!(entry_id = %id, "Date entry saved from toggle");
                }
            }
            FormAction::RemoveDate { id } => {
                let before = self.available_dates.len();
                self.available_dates.retain(|entry| entry.id() != id);
                if self.available_dates.len() == before {
                    return Err(FormError::DateNotFound(id));
                }
            }
        }

        Ok(())
    }

    /// Take over the identifiers the backend assigned after a save: the
    /// record id, and the date entry ids when the backend re-keyed them.
    pub fn merge_saved(&mut self, record: &BlockSeatRecord) {
        self.id = Some(record.id.clone());

        let saved = &record.payload.available_dates;
        let rekeyed = saved.len() == self.available_dates.len()
            && saved
                .iter()
                .zip(&self.available_dates)
                .any(|(stored, local)| stored.id() != local.id());
        if rekeyed {
            debug!(record_id = %record.id, "Adopting backend date entry ids");
            self.available_dates = saved.clone();
        }
    }

    fn sync_builder(&mut self) {
        let round_trip = self.is_round_trip();
        self.builder.set_round_trip(round_trip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Leg;
    use crate::stoppage::StopSettings;
    use blockseat_shared::TimePoint;

    fn at(raw: &str) -> TimePoint {
        TimePoint::parse(raw)
    }

    fn edit(form: &mut InventoryForm, action: DraftAction) {
        form.apply(FormAction::EditDraft { action }).unwrap();
    }

    fn add_one_way_date(form: &mut InventoryForm, departure: &str, arrival: &str, deadline: &str) {
        form.apply(FormAction::OpenDateEntry).unwrap();
        edit(form, DraftAction::SetDeparture { at: at(departure) });
        edit(form, DraftAction::SetArrival { at: at(arrival) });
        edit(form, DraftAction::SetDeadline { at: at(deadline) });
        form.apply(FormAction::SaveDateEntry).unwrap();
    }

    #[test]
    fn test_save_and_remove_dates() {
        let mut form = InventoryForm::new();
        add_one_way_date(&mut form, "2025-12-02T09:00Z", "2025-12-02T13:00Z", "2025-11-25");
        add_one_way_date(&mut form, "2025-11-02T09:00Z", "2025-11-02T13:00Z", "2025-10-25");
        assert_eq!(form.available_dates().len(), 2);

        let earliest = form.first_available_date().unwrap().id().to_string();
        assert_eq!(form.available_dates()[1].id(), earliest);

        form.apply(FormAction::RemoveDate { id: earliest.clone() }).unwrap();
        assert_eq!(form.available_dates().len(), 1);
        assert_eq!(
            form.apply(FormAction::RemoveDate { id: earliest.clone() }),
            Err(FormError::DateNotFound(earliest))
        );
    }

    #[test]
    fn test_trip_type_drives_builder() {
        let mut form = InventoryForm::new();
        form.apply(FormAction::SetTripType {
            trip_type: TripType::RoundTrip,
        })
        .unwrap();
        assert!(form.builder().is_round_trip());

        form.apply(FormAction::OpenDateEntry).unwrap();
        edit(
            &mut form,
            DraftAction::SetStopSettings {
                leg: Leg::Return,
                settings: StopSettings::new(true, 2),
            },
        );
        edit(&mut form, DraftAction::SetReturnDeparture { at: at("2025-12-09T09:00Z") });
        assert_eq!(form.builder().draft().return_stops.len(), 2);

        form.apply(FormAction::SetTripType { trip_type: TripType::OneWay }).unwrap();
        assert!(!form.builder().is_round_trip());
        assert!(form.builder().draft().return_stops.is_empty());
        assert!(!form.builder().draft().return_departure.is_set());
    }

    #[test]
    fn test_invalid_save_surfaces_gate_message() {
        let mut form = InventoryForm::new();
        form.apply(FormAction::OpenDateEntry).unwrap();
        edit(&mut form, DraftAction::SetDeparture { at: at("2025-12-02T09:00Z") });
        let err = form.apply(FormAction::SaveDateEntry).unwrap_err();
        assert_eq!(err.to_string(), "Please select departure, arrival and deadline dates");
        assert!(form.available_dates().is_empty());
    }

    #[test]
    fn test_merge_saved_adopts_backend_ids() {
        use crate::inventory::BlockSeatPayload;

        let mut form = InventoryForm::new();
        add_one_way_date(&mut form, "2025-12-02T09:00Z", "2025-12-02T13:00Z", "2025-11-25");
        let local_id = form.available_dates()[0].id().to_string();

        let mut dates = serde_json::to_value(form.available_dates()).unwrap();
        dates[0]["id"] = serde_json::json!("65f0c0ffee");
        let record = BlockSeatRecord {
            id: "bs-9".to_string(),
            payload: BlockSeatPayload {
                available_dates: serde_json::from_value(dates).unwrap(),
                ..Default::default()
            },
            created_at: None,
            updated_at: None,
        };

        form.merge_saved(&record);
        assert_eq!(form.id.as_deref(), Some("bs-9"));
        assert_eq!(form.available_dates()[0].id(), "65f0c0ffee");
        assert_ne!(local_id, "65f0c0ffee");
        assert_eq!(form.available_dates()[0].departure(), record.payload.available_dates[0].departure());
    }

    #[test]
    fn test_remove_unknown_class() {
        let mut form = InventoryForm::new();
        assert_eq!(
            form.apply(FormAction::RemoveClass {
                class: CabinClass::First
            }),
            Err(FormError::ClassNotFound(CabinClass::First))
        );
    }

    #[test]
    fn test_form_json_skips_builder() {
        let mut form = InventoryForm::new();
        form.apply(FormAction::OpenDateEntry).unwrap();
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("builder").is_none());
        assert!(json.get("availableDates").is_some());

        let decoded: InventoryForm = serde_json::from_value(json).unwrap();
        assert!(!decoded.builder().is_open());
    }
}
