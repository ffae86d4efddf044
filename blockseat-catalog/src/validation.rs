use crate::dates::{FlightDateEntry, InventoryDraft, StoppageLeg};
use crate::stoppage::StopSettings;

/// Why a draft date entry cannot be saved yet. Stop numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select departure, arrival and deadline dates")]
    MissingOutboundDates,

    #[error("Please select return departure and return arrival dates for a round trip")]
    MissingReturnDates,

    #[error("Return departure cannot be before the outbound arrival")]
    ReturnBeforeOutbound,

    #[error("Please fill in arrival and departure times for every outbound stop")]
    IncompleteOutboundStops,

    #[error("Outbound stop {stop}: departure cannot be before arrival")]
    OutboundStopOrder { stop: usize },

    #[error("Please fill in arrival and departure times for every return stop")]
    IncompleteReturnStops,

    #[error("Return stop {stop}: departure cannot be before arrival")]
    ReturnStopOrder { stop: usize },
}

/// Gate in front of the date-entry save. Rules run in a fixed order and the
/// first failure wins:
///
/// 1. departure, arrival and deadline are set
/// 2. round trip: both return times are set and the return does not leave
///    before the outbound lands
/// 3. outbound stops (when active): all times set, each departure >= arrival
/// 4. return stops (round trip, when active): same checks
pub fn can_save(
    draft: &InventoryDraft,
    outbound: &StopSettings,
    inbound: &StopSettings,
    is_round_trip: bool,
) -> Result<(), ValidationError> {
    if !(draft.departure.is_set() && draft.arrival.is_set() && draft.deadline.is_set()) {
        return Err(ValidationError::MissingOutboundDates);
    }

    if is_round_trip {
        if !(draft.return_departure.is_set() && draft.return_arrival.is_set()) {
            return Err(ValidationError::MissingReturnDates);
        }
        if draft.return_departure.is_before(&draft.arrival) {
            return Err(ValidationError::ReturnBeforeOutbound);
        }
    }

    if outbound.requires_stops() {
        check_stops(&draft.outbound_stops, outbound.effective_count()).map_err(|failure| match failure {
            StopFailure::Incomplete => ValidationError::IncompleteOutboundStops,
            StopFailure::Order(stop) => ValidationError::OutboundStopOrder { stop },
        })?;
    }

    if is_round_trip && inbound.requires_stops() {
        check_stops(&draft.return_stops, inbound.effective_count()).map_err(|failure| match failure {
            StopFailure::Incomplete => ValidationError::IncompleteReturnStops,
            StopFailure::Order(stop) => ValidationError::ReturnStopOrder { stop },
        })?;
    }

    Ok(())
}

/// Run the save gate again over an already committed entry, e.g. one that
/// arrived in a request body rather than from the builder. Stop settings are
/// read back from the stop arrays the entry carries.
pub fn check_entry(entry: &FlightDateEntry, is_round_trip: bool) -> Result<(), ValidationError> {
    let draft = InventoryDraft {
        departure: *entry.departure(),
        arrival: *entry.arrival(),
        return_departure: *entry.return_departure(),
        return_arrival: *entry.return_arrival(),
        deadline: *entry.deadline(),
        outbound_layover: entry.outbound_layover().clone(),
        return_layover: entry.return_layover().clone(),
        outbound_stops: entry.outbound_stops().to_vec(),
        return_stops: entry.return_stops().to_vec(),
    };
    let outbound = StopSettings {
        active: !draft.outbound_stops.is_empty(),
        count: draft.outbound_stops.len(),
    };
    let inbound = StopSettings {
        active: !draft.return_stops.is_empty(),
        count: draft.return_stops.len(),
    };
    can_save(&draft, &outbound, &inbound, is_round_trip)
}

enum StopFailure {
    Incomplete,
    Order(usize),
}

fn check_stops(stops: &[StoppageLeg], expected: usize) -> Result<(), StopFailure> {
    if stops.len() < expected || stops.iter().take(expected).any(|s| !s.is_complete()) {
        return Err(StopFailure::Incomplete);
    }

    match stops.iter().take(expected).position(|s| !s.is_ordered()) {
        Some(index) => Err(StopFailure::Order(index + 1)),
        None => Ok(()),
    }
}
