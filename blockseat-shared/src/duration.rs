use crate::time::TimePoint;

/// Shown while either endpoint is missing.
pub const DURATION_PLACEHOLDER: &str = "…";

/// Shown when the end precedes the start.
pub const DURATION_ERROR: &str = "Error";

/// Human-readable elapsed time between two points, e.g. `"3h 15m"` or `"45m"`.
///
/// Never fails: missing endpoints give [`DURATION_PLACEHOLDER`] and a
/// negative span gives [`DURATION_ERROR`].
pub fn calculate_duration(start: &TimePoint, end: &TimePoint) -> String {
    match (start.instant(), end.instant()) {
        (Some(from), Some(to)) if to < from => DURATION_ERROR.to_string(),
        (Some(from), Some(to)) => format_minutes((to - from).num_minutes()),
        _ => DURATION_PLACEHOLDER.to_string(),
    }
}

/// Same as [`calculate_duration`] for raw form input.
pub fn calculate_duration_raw(start: &str, end: &str) -> String {
    calculate_duration(&TimePoint::parse(start), &TimePoint::parse(end))
}

pub fn format_minutes(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
