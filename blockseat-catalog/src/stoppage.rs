use blockseat_shared::TimePoint;
use serde::{Deserialize, Serialize};

use crate::dates::{LayoverDuration, StoppageLeg};

/// Upper bound offered by the stop-count select.
pub const MAX_STOPS: usize = 5;

/// Whether a leg has intermediate stops, and how many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSettings {
    pub active: bool,
    pub count: usize,
}

impl StopSettings {
    pub fn new(active: bool, count: usize) -> Self {
        Self {
            active,
            count: count.min(MAX_STOPS),
        }
    }

    /// Length the stop array must have under these settings.
    pub fn effective_count(&self) -> usize {
        if self.active {
            self.count.min(MAX_STOPS)
        } else {
            0
        }
    }

    pub fn requires_stops(&self) -> bool {
        self.effective_count() > 0
    }
}

/// Grow or shrink `stops` to exactly `count` entries. New slots are unset.
pub fn resize_stops(stops: &mut Vec<StoppageLeg>, count: usize) {
    stops.resize(count, StoppageLeg::default());
}

/// Recompute stop arrivals from `from_index` onward.
///
/// Stop 0 hangs off `leg_arrival`; every later stop hangs off the previous
/// stop's departure, or its arrival while that departure is still blank.
/// Each arrival is `reference + layover`. A missing reference clears the stop
/// entirely, which cascades down the chain. A departure that the new arrival
/// overtakes is cleared so the user must pick a consistent one.
///
/// Stops before `from_index` are returned unchanged.
pub fn derive_stops(
    leg_arrival: &TimePoint,
    layover: &LayoverDuration,
    stops: &[StoppageLeg],
    from_index: usize,
) -> Vec<StoppageLeg> {
    let offset = layover.as_duration();
    let mut derived = stops.to_vec();

    for index in from_index..derived.len() {
        let reference = match index.checked_sub(1).and_then(|prev| derived.get(prev)) {
            None => *leg_arrival,
            Some(prev) if prev.departure_at.is_set() => prev.departure_at,
            Some(prev) => prev.arrival_at,
        };

        let Some(stop) = derived.get_mut(index) else {
            break;
        };

        if !reference.is_set() {
            *stop = StoppageLeg::default();
            continue;
        }

        stop.arrival_at = reference.plus(offset);
        if stop.departure_at.is_before(&stop.arrival_at) {
            stop.departure_at = TimePoint::Unset;
        }
    }

    derived
}
