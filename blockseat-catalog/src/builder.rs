use blockseat_shared::duration::calculate_duration;
use blockseat_shared::TimePoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates::{FlightDateEntry, InventoryDraft, LayoverDuration, StoppageLeg};
use crate::stoppage::{derive_stops, resize_stops, StopSettings};
use crate::validation::{can_save, ValidationError};

/// Whether the "new date" sub-form is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuilderState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Leg {
    Outbound,
    Return,
}

/// Edits the user can make to an open draft.
///
/// Stop arrivals have no action of their own; they always come from the leg
/// arrival plus layover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftAction {
    SetDeparture { at: TimePoint },
    SetArrival { at: TimePoint },
    SetReturnDeparture { at: TimePoint },
    SetReturnArrival { at: TimePoint },
    SetDeadline { at: TimePoint },
    SetLayover { leg: Leg, layover: LayoverDuration },
    SetStopSettings { leg: Leg, settings: StopSettings },
    SetStopDeparture { leg: Leg, index: usize, at: TimePoint },
}

/// Result of the single toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Opened,
    Saved(String),
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("No date entry is being edited")]
    NotOpen,

    #[error("{leg:?} stop {index} does not exist")]
    StopOutOfRange { leg: Leg, index: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Sub-form that collects one [`FlightDateEntry`] at a time.
///
/// Closed until `open`; `save` validates, appends the entry to the caller's
/// list and resets the draft; `cancel` throws the draft away. Stop settings
/// outlive individual drafts so consecutive entries keep the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateEntryBuilder {
    state: BuilderState,
    draft: InventoryDraft,
    outbound_settings: StopSettings,
    return_settings: StopSettings,
    round_trip: bool,
}

impl DateEntryBuilder {
    pub fn new(round_trip: bool) -> Self {
        Self {
            round_trip,
            ..Self::default()
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == BuilderState::Open
    }

    pub fn draft(&self) -> &InventoryDraft {
        &self.draft
    }

    pub fn is_round_trip(&self) -> bool {
        self.round_trip
    }

    pub fn settings(&self, leg: Leg) -> StopSettings {
        match leg {
            Leg::Outbound => self.outbound_settings,
            Leg::Return => self.return_settings,
        }
    }

    /// Switching to one-way drops everything on the return side.
    pub fn set_round_trip(&mut self, round_trip: bool) {
        if self.round_trip == round_trip {
            return;
        }
        self.round_trip = round_trip;
        if !round_trip {
            self.return_settings = StopSettings::default();
            self.draft.return_departure = TimePoint::Unset;
            self.draft.return_arrival = TimePoint::Unset;
            self.draft.return_layover = LayoverDuration::default();
            self.draft.return_stops.clear();
        }
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.reset_draft();
        self.state = BuilderState::Open;
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("Discarding draft date entry");
        }
        self.reset_draft();
        self.state = BuilderState::Closed;
    }

    /// Apply one edit, then rerun the stop derivation the edit feeds.
    pub fn apply(&mut self, action: DraftAction) -> Result<(), BuilderError> {
        if !self.is_open() {
            return Err(BuilderError::NotOpen);
        }

        match action {
            DraftAction::SetDeparture { at } => self.draft.departure = at,
            DraftAction::SetReturnDeparture { at } => self.draft.return_departure = at,
            DraftAction::SetDeadline { at } => self.draft.deadline = at,
            DraftAction::SetArrival { at } => {
                self.draft.arrival = at;
                self.recompute(Leg::Outbound, 0);
            }
            DraftAction::SetReturnArrival { at } => {
                self.draft.return_arrival = at;
                self.recompute(Leg::Return, 0);
            }
            DraftAction::SetLayover { leg, layover } => {
                match leg {
                    Leg::Outbound => self.draft.outbound_layover = layover,
                    Leg::Return => self.draft.return_layover = layover,
                }
                self.recompute(leg, 0);
            }
            DraftAction::SetStopSettings { leg, settings } => {
                let settings = StopSettings::new(settings.active, settings.count);
                match leg {
                    Leg::Outbound => self.outbound_settings = settings,
                    Leg::Return => self.return_settings = settings,
                }
                resize_stops(self.stops_mut(leg), settings.effective_count());
                self.recompute(leg, 0);
            }
            DraftAction::SetStopDeparture { leg, index, at } => {
                let stop = self
                    .stops_mut(leg)
                    .get_mut(index)
                    .ok_or(BuilderError::StopOutOfRange { leg, index })?;
                stop.departure_at = at;
                // The edited stop keeps its departure even when it is out of
                // order; the gate reports that. Only later stops move.
                self.recompute(leg, index + 1);
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        can_save(&self.draft, &self.outbound_settings, &self.return_settings, self.round_trip)
    }

    /// Commit the draft into `dates`. Returns the new entry's id.
    pub fn save(&mut self, dates: &mut Vec<FlightDateEntry>) -> Result<String, BuilderError> {
        if !self.is_open() {
            return Err(BuilderError::NotOpen);
        }
        self.validate()?;

        let entry = FlightDateEntry::commit(
            &self.draft,
            &self.outbound_settings,
            &self.return_settings,
            self.round_trip,
        );
        let id = entry.id().to_string();
        debug!(entry_id = %id, total_dates = dates.len() + 1, "Committed date entry");
        dates.push(entry);

        self.reset_draft();
        self.state = BuilderState::Closed;
        Ok(id)
    }

    /// One control for everything: opens when closed, saves when the draft
    /// is valid, discards otherwise.
    pub fn toggle(&mut self, dates: &mut Vec<FlightDateEntry>) -> ToggleOutcome {
        if !self.is_open() {
            self.open();
            return ToggleOutcome::Opened;
        }
        match self.save(dates) {
            Ok(id) => ToggleOutcome::Saved(id),
            Err(_) => {
                self.cancel();
                ToggleOutcome::Discarded
            }
        }
    }

    /// Label for the toggle control, reflecting what a click would do.
    pub fn toggle_label(&self) -> &'static str {
        match (self.state, self.validate().is_ok()) {
            (BuilderState::Closed, _) => "Add Date",
            (BuilderState::Open, true) => "Save Date",
            (BuilderState::Open, false) => "Close",
        }
    }

    pub fn outbound_duration(&self) -> String {
        calculate_duration(&self.draft.departure, &self.draft.arrival)
    }

    pub fn return_duration(&self) -> String {
        calculate_duration(&self.draft.return_departure, &self.draft.return_arrival)
    }

    fn reset_draft(&mut self) {
        let inbound = if self.round_trip {
            self.return_settings.effective_count()
        } else {
            0
        };
        self.draft = InventoryDraft::sized(self.outbound_settings.effective_count(), inbound);
    }

    fn stops_mut(&mut self, leg: Leg) -> &mut Vec<StoppageLeg> {
        match leg {
            Leg::Outbound => &mut self.draft.outbound_stops,
            Leg::Return => &mut self.draft.return_stops,
        }
    }

    fn recompute(&mut self, leg: Leg, from_index: usize) {
        match leg {
            Leg::Outbound => {
                self.draft.outbound_stops = derive_stops(
                    &self.draft.arrival,
                    &self.draft.outbound_layover,
                    &self.draft.outbound_stops,
                    from_index,
                );
            }
            Leg::Return => {
                self.draft.return_stops = derive_stops(
                    &self.draft.return_arrival,
                    &self.draft.return_layover,
                    &self.draft.return_stops,
                    from_index,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> TimePoint {
        TimePoint::parse(raw)
    }

    #[test]
    fn test_one_way_save_appends_and_resets() {
        let mut builder = DateEntryBuilder::new(false);
        let mut dates = Vec::new();
        assert_eq!(builder.toggle_label(), "Add Date");

        builder.open();
        assert_eq!(builder.toggle_label(), "Close");
        builder.apply(DraftAction::SetDeparture { at: at("2025-10-20T14:30Z") }).unwrap();
        builder.apply(DraftAction::SetArrival { at: at("2025-10-20T17:45Z") }).unwrap();
        builder.apply(DraftAction::SetDeadline { at: at("2025-10-15") }).unwrap();
        assert_eq!(builder.toggle_label(), "Save Date");
        assert_eq!(builder.outbound_duration(), "3h 15m");

        let id = builder.save(&mut dates).unwrap();

        assert_eq!(dates.len(), 1);
        let entry = &dates[0];
        assert_eq!(entry.id(), id);
        assert_eq!(entry.departure(), &at("2025-10-20T14:30Z"));
        assert_eq!(entry.arrival(), &at("2025-10-20T17:45Z"));
        assert_eq!(entry.deadline(), &at("2025-10-15"));
        assert!(entry.outbound_stops().is_empty());
        assert!(entry.return_stops().is_empty());
        assert!(!entry.has_return());

        assert_eq!(builder.state(), BuilderState::Closed);
        assert!(builder.draft().is_empty());
    }

    #[test]
    fn test_edits_rejected_while_closed() {
        let mut builder = DateEntryBuilder::new(false);
        let err = builder.apply(DraftAction::SetDeadline { at: at("2025-10-15") }).unwrap_err();
        assert_eq!(err, BuilderError::NotOpen);
        assert_eq!(builder.save(&mut Vec::new()).unwrap_err(), BuilderError::NotOpen);
    }

    #[test]
    fn test_invalid_save_leaves_list_and_draft() {
        let mut builder = DateEntryBuilder::new(true);
        let mut dates = Vec::new();
        builder.open();
        builder.apply(DraftAction::SetDeparture { at: at("2025-10-20T14:30Z") }).unwrap();
        builder.apply(DraftAction::SetArrival { at: at("2025-10-20T17:45Z") }).unwrap();
        builder.apply(DraftAction::SetDeadline { at: at("2025-10-15") }).unwrap();
        builder.apply(DraftAction::SetReturnDeparture { at: at("2025-10-20T16:00Z") }).unwrap();
        builder.apply(DraftAction::SetReturnArrival { at: at("2025-10-20T20:00Z") }).unwrap();

        let err = builder.save(&mut dates).unwrap_err();
        assert_eq!(err, BuilderError::Validation(ValidationError::ReturnBeforeOutbound));
        assert_eq!(err.to_string(), "Return departure cannot be before the outbound arrival");
        assert!(dates.is_empty());
        assert!(builder.is_open());
        assert!(builder.draft().return_departure.is_set());
    }

    #[test]
    fn test_two_stop_outbound_derivation_and_gate() {
        let mut builder = DateEntryBuilder::new(false);
        builder.open();
        builder
            .apply(DraftAction::SetStopSettings {
                leg: Leg::Outbound,
                settings: StopSettings::new(true, 2),
            })
            .unwrap();
        builder
            .apply(DraftAction::SetLayover {
                leg: Leg::Outbound,
                layover: LayoverDuration::new(1, 30),
            })
            .unwrap();
        builder.apply(DraftAction::SetDeparture { at: at("2025-11-01T07:00Z") }).unwrap();
        builder.apply(DraftAction::SetArrival { at: at("2025-11-01T10:00Z") }).unwrap();
        builder.apply(DraftAction::SetDeadline { at: at("2025-10-25") }).unwrap();

        let stops = &builder.draft().outbound_stops;
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].arrival_at, at("2025-11-01T11:30Z"));
        assert_eq!(stops[1].arrival_at, at("2025-11-01T13:00Z"));

        builder
            .apply(DraftAction::SetStopDeparture {
                leg: Leg::Outbound,
                index: 0,
                at: at("2025-11-01T11:00Z"),
            })
            .unwrap();
        // The edited stop keeps the bad departure; the next stop re-anchors on it.
        assert_eq!(builder.draft().outbound_stops[0].departure_at, at("2025-11-01T11:00Z"));
        assert_eq!(builder.draft().outbound_stops[1].arrival_at, at("2025-11-01T12:30Z"));

        builder
            .apply(DraftAction::SetStopDeparture {
                leg: Leg::Outbound,
                index: 1,
                at: at("2025-11-01T13:00Z"),
            })
            .unwrap();

        let err = builder.validate().unwrap_err();
        assert_eq!(err, ValidationError::OutboundStopOrder { stop: 1 });
        assert!(err.to_string().contains("departure cannot be before arrival"));
    }

    #[test]
    fn test_clearing_arrival_clears_every_stop() {
        let mut builder = DateEntryBuilder::new(false);
        builder.open();
        builder
            .apply(DraftAction::SetStopSettings {
                leg: Leg::Outbound,
                settings: StopSettings::new(true, 3),
            })
            .unwrap();
        builder.apply(DraftAction::SetArrival { at: at("2025-11-01T10:00Z") }).unwrap();
        builder
            .apply(DraftAction::SetStopDeparture {
                leg: Leg::Outbound,
                index: 0,
                at: at("2025-11-01T12:00Z"),
            })
            .unwrap();
        assert!(builder.draft().outbound_stops.iter().all(|s| s.arrival_at.is_set()));

        builder.apply(DraftAction::SetArrival { at: TimePoint::Unset }).unwrap();
        assert!(builder
            .draft()
            .outbound_stops
            .iter()
            .all(|s| !s.arrival_at.is_set() && !s.departure_at.is_set()));
    }

    #[test]
    fn test_stop_departure_out_of_range() {
        let mut builder = DateEntryBuilder::new(false);
        builder.open();
        let err = builder
            .apply(DraftAction::SetStopDeparture {
                leg: Leg::Return,
                index: 0,
                at: at("2025-11-01T12:00Z"),
            })
            .unwrap_err();
        assert_eq!(err, BuilderError::StopOutOfRange { leg: Leg::Return, index: 0 });
    }

    #[test]
    fn test_reset_keeps_stop_shape() {
        let mut builder = DateEntryBuilder::new(true);
        let mut dates = Vec::new();
        builder.open();
        builder
            .apply(DraftAction::SetStopSettings {
                leg: Leg::Return,
                settings: StopSettings::new(true, 1),
            })
            .unwrap();
        builder.apply(DraftAction::SetDeparture { at: at("2025-12-01T08:00Z") }).unwrap();
        builder.apply(DraftAction::SetArrival { at: at("2025-12-01T12:00Z") }).unwrap();
        builder.apply(DraftAction::SetDeadline { at: at("2025-11-20") }).unwrap();
        builder.apply(DraftAction::SetReturnDeparture { at: at("2025-12-08T08:00Z") }).unwrap();
        builder.apply(DraftAction::SetReturnArrival { at: at("2025-12-08T10:00Z") }).unwrap();
        builder
            .apply(DraftAction::SetStopDeparture {
                leg: Leg::Return,
                index: 0,
                at: at("2025-12-08T11:00Z"),
            })
            .unwrap();

        assert_eq!(builder.toggle(&mut dates), ToggleOutcome::Saved(dates[0].id().to_string()));
        assert_eq!(dates[0].return_stops().len(), 1);

        assert_eq!(builder.toggle(&mut dates), ToggleOutcome::Opened);
        assert_eq!(builder.draft().return_stops.len(), 1);
        assert!(builder.draft().is_empty());

        assert_eq!(builder.toggle(&mut dates), ToggleOutcome::Discarded);
        assert_eq!(dates.len(), 1);
        assert!(!builder.is_open());
    }

    #[test]
    fn test_saved_ids_are_unique() {
        let mut builder = DateEntryBuilder::new(false);
        let mut dates = Vec::new();
        for _ in 0..3 {
            builder.open();
            builder.apply(DraftAction::SetDeparture { at: at("2025-10-20T14:30Z") }).unwrap();
            builder.apply(DraftAction::SetArrival { at: at("2025-10-20T17:45Z") }).unwrap();
            builder.apply(DraftAction::SetDeadline { at: at("2025-10-15") }).unwrap();
            builder.save(&mut dates).unwrap();
        }
        assert_eq!(dates.len(), 3);
        assert_ne!(dates[0].id(), dates[1].id());
        assert_ne!(dates[1].id(), dates[2].id());
    }
}
