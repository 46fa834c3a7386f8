//! Serde adapters for the fixed `YYYY-MM-DD HH:MM:SS` timestamp text.
//!
//! Writing always uses [`TIMESTAMP_FORMAT`]. Reading also accepts the
//! minute-precision [`LEGACY_TIMESTAMP_FORMAT`].

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serializer};

use crate::config::{LEGACY_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT};

/// Current local time truncated to whole seconds, so a value survives a
/// save/load round-trip unchanged.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT))
        .ok()
}

pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw:?}")))
}

/// Same as the parent module, for `Option<NaiveDateTime>` fields.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ts: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => super::serialize(ts, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid timestamp: {raw:?}"))
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parse_accepts_seconds_and_minutes() {
        let full = parse("2024-05-01 09:15:42").unwrap();
        assert_eq!(full.second(), 42);

        let legacy = parse("2024-05-01 09:15").unwrap();
        assert_eq!(legacy.minute(), 15);
        assert_eq!(legacy.second(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("yesterday").is_none());
        assert!(parse("2024-13-01 00:00:00").is_none());
    }

    #[test]
    fn format_uses_second_precision() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(format(&ts), "2024-01-02 03:04:05");
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
