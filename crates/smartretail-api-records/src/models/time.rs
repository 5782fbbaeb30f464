//! Timestamp normalization for incoming sale records.
//!
//! Sale timestamps are stored and compared as UTC regardless of how they
//! arrive: an offset-aware timestamp is converted, a naive one is taken as
//! already-UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a timestamp into `DateTime<Utc>`, accepting both
/// offset-aware (RFC 3339) and naive (`YYYY-MM-DDTHH:MM:SS[.f]`) input.
pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(aware) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(aware.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid timestamp {raw:?}: expected RFC 3339 or naive ISO 8601"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_utc")]
        ts: DateTime<Utc>,
    }

    fn parse(raw: &str) -> DateTime<Utc> {
        let wrapper: Wrapper = serde_json::from_str(&format!(r#"{{"ts": "{raw}"}}"#)).unwrap();
        wrapper.ts
    }

    #[test]
    fn test_offset_input_is_converted_to_utc() {
        let ts = parse("2024-06-01T14:30:00+02:00");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_zulu_input_is_kept() {
        let ts = parse("2024-06-01T12:30:00Z");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_naive_input_is_taken_as_utc() {
        let ts = parse("2024-06-01T12:30:00");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_naive_input_with_fraction() {
        let ts = parse("2024-06-01T12:30:00.250");
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"ts": "yesterday"}"#);
        assert!(result.is_err());
    }
}
