//! Fixed timestamp wire format
//!
//! All timestamps cross the wire (and land in the store) as ISO 8601 UTC
//! with exactly millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
//! chrono's default RFC 3339 output has variable sub-second precision, so
//! serialization goes through the helpers here instead.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp in the wire format.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reparse an externally supplied timestamp string.
///
/// Non-conforming but parseable inputs are normalized to UTC; unparseable
/// inputs are replaced with the current time.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Serde adapter serializing `DateTime<Utc>` in the wire format.
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(super::normalize_timestamp(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_millisecond_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn normalizes_offset_timestamps_to_utc() {
        let ts = normalize_timestamp("2024-06-01T12:30:00+02:00");
        assert_eq!(format_timestamp(&ts), "2024-06-01T10:30:00.000Z");
    }

    #[test]
    fn unparseable_input_falls_back_to_now() {
        let before = Utc::now();
        let ts = normalize_timestamp("last tuesday");
        assert!(ts >= before);
    }
}
