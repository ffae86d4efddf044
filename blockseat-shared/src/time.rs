use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Naive layouts accepted from date pickers; all are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A timezone-aware instant, or nothing at all.
///
/// Crosses the wire as an ISO-8601 string; the unset value is the empty
/// string. Parsing never fails: anything that is not a recognizable
/// timestamp becomes [`TimePoint::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimePoint {
    #[default]
    Unset,
    At(DateTime<FixedOffset>),
}

impl TimePoint {
    /// Lenient parse. RFC 3339, `YYYY-MM-DDTHH:MM[Z|±hh:mm]`, naive
    /// date-times and bare dates (midnight UTC) are understood.
    pub fn parse(input: &str) -> Self {
        let raw = input.trim();
        if raw.is_empty() {
            return TimePoint::Unset;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return TimePoint::At(dt);
        }

        // Minute-precision with an explicit offset, e.g. 2025-10-20T14:30+02:00
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
            return TimePoint::At(dt);
        }

        let naive_part = raw
            .strip_suffix('Z')
            .or_else(|| raw.strip_suffix('z'))
            .unwrap_or(raw);

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, format) {
                return Self::from_naive_utc(naive);
            }
        }

        NaiveDate::parse_from_str(naive_part, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::from_naive_utc)
            .unwrap_or(TimePoint::Unset)
    }

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        TimePoint::At(at.fixed_offset())
    }

    fn from_naive_utc(naive: NaiveDateTime) -> Self {
        TimePoint::At(Utc.from_utc_datetime(&naive).fixed_offset())
    }

    pub fn is_set(&self) -> bool {
        matches!(self, TimePoint::At(_))
    }

    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            TimePoint::At(at) => Some(*at),
            TimePoint::Unset => None,
        }
    }

    /// Shift by `offset`. Unset stays unset.
    pub fn plus(&self, offset: Duration) -> Self {
        match self {
            TimePoint::At(at) => at
                .checked_add_signed(offset)
                .map(TimePoint::At)
                .unwrap_or(TimePoint::Unset),
            TimePoint::Unset => TimePoint::Unset,
        }
    }

    /// True only when both points are set and `self` is strictly earlier.
    pub fn is_before(&self, other: &TimePoint) -> bool {
        match (self, other) {
            (TimePoint::At(a), TimePoint::At(b)) => a < b,
            _ => false,
        }
    }

    /// Minutes from `self` to `later`; `None` unless both are set.
    pub fn minutes_until(&self, later: &TimePoint) -> Option<i64> {
        match (self, later) {
            (TimePoint::At(a), TimePoint::At(b)) => Some((*b - *a).num_minutes()),
            _ => None,
        }
    }

    pub fn to_iso_string(&self) -> String {
        match self {
            TimePoint::At(at) => at.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimePoint::Unset => String::new(),
        }
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl FromStr for TimePoint {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimePoint::parse(s))
    }
}

impl From<DateTime<Utc>> for TimePoint {
    fn from(at: DateTime<Utc>) -> Self {
        TimePoint::from_utc(at)
    }
}

impl Serialize for TimePoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything that is not a string (null, numbers, objects) reads as unset.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(raw) => TimePoint::parse(&raw),
            _ => TimePoint::Unset,
        })
    }
}
