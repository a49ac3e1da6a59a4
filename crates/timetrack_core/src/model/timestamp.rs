//! Lenient timestamp parsing for inbound JSON.
//!
//! Accepts RFC 3339 (`2024-03-01T09:00:00Z`, `...+02:00`) and offset-free
//! `YYYY-MM-DDTHH:MM:SS[.fff]`, which is read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses one timestamp string into UTC.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::parse;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(parse("2024-05-06T07:08:09Z"), Some(expected));
        assert_eq!(parse("2024-05-06T07:08:09"), Some(expected));
        assert_eq!(parse("2024-05-06 07:08:09"), Some(expected));
        assert_eq!(parse("not a date"), None);
    }
}
