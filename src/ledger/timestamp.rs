//! Instants tagged with the zone they were recorded in.
//!
//! Persisted as `{"timestamp": <seconds since epoch>, "timezone": "<IANA name>"}`;
//! calendar accessors interpret the instant in the stored zone.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::keys::TimestampKey;
use crate::errors::LedgerError;

static SUPPORTED_ZONES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut zones: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    zones.sort_unstable();
    zones
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TimestampRecord", into = "TimestampRecord")]
pub struct Timestamp {
    datetime: DateTime<Tz>,
}

#[derive(Serialize, Deserialize)]
struct TimestampRecord {
    timestamp: i64,
    timezone: String,
}

impl TryFrom<TimestampRecord> for Timestamp {
    type Error = LedgerError;

    fn try_from(record: TimestampRecord) -> Result<Self, Self::Error> {
        let tz = parse_timezone(&record.timezone)?;
        Timestamp::new(record.timestamp, tz)
    }
}

impl From<Timestamp> for TimestampRecord {
    fn from(value: Timestamp) -> Self {
        Self {
            timestamp: value.timestamp(),
            timezone: value.timezone_name().to_string(),
        }
    }
}

impl Timestamp {
    pub fn new(seconds: i64, tz: Tz) -> Result<Self, LedgerError> {
        tz.timestamp_opt(seconds, 0)
            .single()
            .map(|datetime| Self { datetime })
            .ok_or(LedgerError::InvalidTimestamp(seconds))
    }

    /// Composes a calendar reading in `tz`. Ambiguous local times resolve to
    /// the earlier instant; nonexistent ones (spring-forward gaps) and
    /// impossible dates are rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        tz: Tz,
    ) -> Result<Self, LedgerError> {
        tz.with_ymd_and_hms(year, month, day, hour, minute, second)
            .earliest()
            .map(|datetime| Self { datetime })
            .ok_or_else(|| {
                LedgerError::InvalidDate(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} {}",
                    tz.name()
                ))
            })
    }

    pub fn now(tz: Tz) -> Self {
        Self {
            datetime: Utc::now().with_timezone(&tz),
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.datetime.timestamp()
    }

    pub fn timezone(&self) -> Tz {
        self.datetime.timezone()
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone().name()
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    pub fn second(&self) -> u32 {
        self.datetime.second()
    }

    pub fn get(&self, key: TimestampKey) -> String {
        match key {
            TimestampKey::Timestamp => self.timestamp().to_string(),
            TimestampKey::Timezone => self.timezone_name().to_string(),
            TimestampKey::Year => self.year().to_string(),
            TimestampKey::Month => self.month().to_string(),
            TimestampKey::Day => self.day().to_string(),
            TimestampKey::Hour => self.hour().to_string(),
            TimestampKey::Minute => self.minute().to_string(),
            TimestampKey::Second => self.second().to_string(),
        }
    }

    pub fn formatted(&self) -> String {
        self.datetime.format("%c %Z").to_string()
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.datetime == other.datetime && self.timezone() == other.timezone()
    }
}

impl Eq for Timestamp {}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, LedgerError> {
    name.parse::<Tz>()
        .map_err(|_| LedgerError::InvalidTimezone(name.to_string()))
}

/// Every zone identifier accepted by [`parse_timezone`], sorted.
pub fn supported_timezones() -> &'static [&'static str] {
    &SUPPORTED_ZONES
}

/// Closest supported zone name, if one is within a few edits of `name`.
pub fn suggest_timezone(name: &str) -> Option<&'static str> {
    let needle = name.to_ascii_lowercase();
    SUPPORTED_ZONES
        .iter()
        .map(|zone| (strsim::levenshtein(&needle, &zone.to_ascii_lowercase()), *zone))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, zone)| zone)
}

pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_fields_follow_zone() {
        let tz = parse_timezone("America/Toronto").unwrap();
        let stamp = Timestamp::from_calendar(2023, 4, 30, 13, 5, 9, tz).unwrap();
        assert_eq!(stamp.year(), 2023);
        assert_eq!(stamp.month(), 4);
        assert_eq!(stamp.day(), 30);
        assert_eq!(stamp.hour(), 13);
        assert_eq!(stamp.get(TimestampKey::Minute), "5");
        assert_eq!(stamp.get(TimestampKey::Timezone), "America/Toronto");
        // EDT is UTC-4 at the end of April.
        assert_eq!(stamp.timestamp(), 1_682_874_309);
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(!is_valid_date(2023, 4, 31));
        assert!(is_valid_date(2024, 2, 29));
        assert!(!is_valid_date(2023, 2, 29));
        assert!(matches!(
            Timestamp::from_calendar(2023, 2, 30, 0, 0, 0, Tz::UTC),
            Err(LedgerError::InvalidDate(_))
        ));
    }

    #[test]
    fn json_shape_round_trips_zone() {
        let raw = r#"{"timestamp": 1700000000, "timezone": "Europe/Paris"}"#;
        let stamp: Timestamp = serde_json::from_str(raw).unwrap();
        assert_eq!(stamp.timezone_name(), "Europe/Paris");
        let value = serde_json::to_value(&stamp).unwrap();
        assert_eq!(value["timestamp"], 1_700_000_000);
        assert_eq!(value["timezone"], "Europe/Paris");
    }

    #[test]
    fn unknown_zone_fails_to_parse() {
        let raw = r#"{"timestamp": 0, "timezone": "Mars/Olympus"}"#;
        assert!(serde_json::from_str::<Timestamp>(raw).is_err());
        assert!(matches!(
            parse_timezone("Nowhere"),
            Err(LedgerError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn equality_considers_zone() {
        let utc = Timestamp::new(0, Tz::UTC).unwrap();
        let paris = Timestamp::new(0, parse_timezone("Europe/Paris").unwrap()).unwrap();
        assert_ne!(utc, paris);
        assert_eq!(utc, Timestamp::new(0, Tz::UTC).unwrap());
    }

    #[test]
    fn supported_zones_are_sorted_and_suggestible() {
        let zones = supported_timezones();
        assert!(zones.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(zones.contains(&"America/Toronto"));
        assert_eq!(suggest_timezone("america/toronot"), Some("America/Toronto"));
    }

    #[test]
    fn formatted_uses_zone_abbreviation() {
        let stamp = Timestamp::new(0, Tz::UTC).unwrap();
        assert_eq!(stamp.formatted(), "Thu Jan  1 00:00:00 1970 UTC");
    }
}
