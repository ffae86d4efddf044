use blockseat_shared::duration::calculate_duration;
use blockseat_shared::TimePoint;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stoppage::StopSettings;

pub const MAX_LAYOVER_HOURS: u32 = 99;
pub const MAX_LAYOVER_MINUTES: u32 = 59;

/// One intermediate stop of a multi-leg journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppageLeg {
    #[serde(default)]
    pub arrival_at: TimePoint,
    #[serde(default)]
    pub departure_at: TimePoint,
}

impl StoppageLeg {
    pub fn is_complete(&self) -> bool {
        self.arrival_at.is_set() && self.departure_at.is_set()
    }

    /// Departure is not before arrival. Vacuously true while either is unset.
    pub fn is_ordered(&self) -> bool {
        !self.departure_at.is_before(&self.arrival_at)
    }

    /// Ground time at this stop, e.g. `"1h 30m"`.
    pub fn ground_time(&self) -> String {
        calculate_duration(&self.arrival_at, &self.departure_at)
    }
}

/// Ground time between two legs, as picked from the hour/minute selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoverDuration {
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub minutes: String,
}

impl Default for LayoverDuration {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl LayoverDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours: hours.to_string(),
            minutes: minutes.to_string(),
        }
    }

    /// Hours as a number; text outside `0..=99` counts as zero.
    pub fn hours_value(&self) -> u32 {
        bounded(&self.hours, MAX_LAYOVER_HOURS)
    }

    /// Minutes as a number; text outside `0..=59` counts as zero.
    pub fn minutes_value(&self) -> u32 {
        bounded(&self.minutes, MAX_LAYOVER_MINUTES)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::hours(i64::from(self.hours_value())) + Duration::minutes(i64::from(self.minutes_value()))
    }

    pub fn is_zero(&self) -> bool {
        self.hours_value() == 0 && self.minutes_value() == 0
    }

    /// Options offered by the hour select.
    pub fn hour_options() -> Vec<String> {
        (0..=MAX_LAYOVER_HOURS).map(|h| h.to_string()).collect()
    }

    /// Options offered by the minute select.
    pub fn minute_options() -> Vec<String> {
        (0..=MAX_LAYOVER_MINUTES).map(|m| m.to_string()).collect()
    }
}

fn bounded(raw: &str, max: u32) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value <= max)
        .unwrap_or(0)
}

/// Work-in-progress values of one date entry. Owned by the builder, which is
/// the only place that writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDraft {
    pub departure: TimePoint,
    pub arrival: TimePoint,
    pub return_departure: TimePoint,
    pub return_arrival: TimePoint,
    pub deadline: TimePoint,
    pub outbound_layover: LayoverDuration,
    pub return_layover: LayoverDuration,
    pub outbound_stops: Vec<StoppageLeg>,
    pub return_stops: Vec<StoppageLeg>,
}

impl InventoryDraft {
    /// Empty draft with stop arrays of the given lengths.
    pub fn sized(outbound_stops: usize, return_stops: usize) -> Self {
        Self {
            outbound_stops: vec![StoppageLeg::default(); outbound_stops],
            return_stops: vec![StoppageLeg::default(); return_stops],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        let no_times = [
            self.departure,
            self.arrival,
            self.return_departure,
            self.return_arrival,
            self.deadline,
        ]
        .iter()
        .all(|t| !t.is_set());
        let no_stops = self
            .outbound_stops
            .iter()
            .chain(self.return_stops.iter())
            .all(|s| *s == StoppageLeg::default());
        no_times && no_stops
    }
}

/// A committed, bookable date combination of a block-seat record.
///
/// Entries are never edited in place. The only way to change one is to remove
/// it from the record and save a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDateEntry {
    #[serde(alias = "_id")]
    id: String,
    departure: TimePoint,
    arrival: TimePoint,
    #[serde(default)]
    return_departure: TimePoint,
    #[serde(default)]
    return_arrival: TimePoint,
    deadline: TimePoint,
    #[serde(default)]
    outbound_stops: Vec<StoppageLeg>,
    #[serde(default)]
    return_stops: Vec<StoppageLeg>,
    #[serde(default)]
    outbound_layover: LayoverDuration,
    #[serde(default)]
    return_layover: LayoverDuration,
}

impl FlightDateEntry {
    /// Freeze a draft into an entry with a fresh identifier. Data the trip
    /// shape does not use (return leg of a one-way trip, stops of an inactive
    /// stoppage mode) is dropped.
    pub(crate) fn commit(
        draft: &InventoryDraft,
        outbound: &StopSettings,
        inbound: &StopSettings,
        round_trip: bool,
    ) -> Self {
        let (outbound_stops, outbound_layover) = if outbound.requires_stops() {
            (draft.outbound_stops.clone(), draft.outbound_layover.clone())
        } else {
            (Vec::new(), LayoverDuration::default())
        };

        let (return_stops, return_layover) = if round_trip && inbound.requires_stops() {
            (draft.return_stops.clone(), draft.return_layover.clone())
        } else {
            (Vec::new(), LayoverDuration::default())
        };

        let (return_departure, return_arrival) = if round_trip {
            (draft.return_departure, draft.return_arrival)
        } else {
            (TimePoint::Unset, TimePoint::Unset)
        };

        Self {
            id: Uuid::new_v4().to_string(),
            departure: draft.departure,
            arrival: draft.arrival,
            return_departure,
            return_arrival,
            deadline: draft.deadline,
            outbound_stops,
            return_stops,
            outbound_layover,
            return_layover,
        }
    }

    /// Copy of this entry stripped of every return-leg field.
    pub(crate) fn without_return(&self) -> Self {
        Self {
            return_departure: TimePoint::Unset,
            return_arrival: TimePoint::Unset,
            return_stops: Vec::new(),
            return_layover: LayoverDuration::default(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn departure(&self) -> &TimePoint {
        &self.departure
    }

    pub fn arrival(&self) -> &TimePoint {
        &self.arrival
    }

    pub fn return_departure(&self) -> &TimePoint {
        &self.return_departure
    }

    pub fn return_arrival(&self) -> &TimePoint {
        &self.return_arrival
    }

    pub fn deadline(&self) -> &TimePoint {
        &self.deadline
    }

    pub fn outbound_stops(&self) -> &[StoppageLeg] {
        &self.outbound_stops
    }

    pub fn return_stops(&self) -> &[StoppageLeg] {
        &self.return_stops
    }

    pub fn outbound_layover(&self) -> &LayoverDuration {
        &self.outbound_layover
    }

    pub fn return_layover(&self) -> &LayoverDuration {
        &self.return_layover
    }

    pub fn has_return(&self) -> bool {
        self.return_departure.is_set() || self.return_arrival.is_set()
    }

    pub fn outbound_duration(&self) -> String {
        calculate_duration(&self.departure, &self.arrival)
    }

    pub fn return_duration(&self) -> String {
        calculate_duration(&self.return_departure, &self.return_arrival)
    }
}
