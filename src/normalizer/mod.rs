//! Hearing time normalization.
//!
//! Hearings arrive as a datetime string plus a raw UTC offset such as `+0500`.
//! The offset is turned into an `Etc/GMT` zone identifier and looked up in the
//! tz database, and the instant is rendered in that zone.
//!
//! Two quirks carry through to the output:
//!
//! - `Etc/GMT` identifiers use POSIX sign order, so the offset sign is inverted
//!   in the identifier (`+0500` becomes `Etc/GMT-5`).
//! - Only the hour digits reach the identifier. `-0330` resolves to `Etc/GMT+3`,
//!   while the label built from the raw string still reads `-03:30`, so the
//!   displayed wall-clock time and the label disagree for half-hour zones.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::app::{DocketError, Result};
use crate::domain::Hearing;

/// Renders like `Wednesday, January 15, 2020, 12:15:00 AM`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%A, %B %-d, %Y, %-I:%M:%S %p";
pub const DEFAULT_PLACEHOLDER: &str = "Date unavailable";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTime {
    pub display: String,
    pub offset_label: String,
    /// The `Etc/GMT` identifier the display was rendered in. Empty for placeholders.
    pub zone: String,
}

#[derive(Debug, Clone)]
pub struct TimeNormalizer {
    datetime_format: String,
    placeholder: String,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeNormalizer {
    pub fn new() -> Self {
        Self::with_format(DEFAULT_DATETIME_FORMAT, DEFAULT_PLACEHOLDER)
    }

    pub fn with_format(datetime_format: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            datetime_format: datetime_format.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn normalize(&self, datetime: &str, offset: &str) -> Result<NormalizedTime> {
        let offset = RawOffset::parse(offset)?;
        let instant = parse_datetime(datetime)?;

        let zone = offset.zone_name();
        let tz: Tz = zone
            .parse()
            .map_err(|e| DocketError::Format(format!("unknown zone {}: {}", zone, e)))?;

        let mut display = String::new();
        write!(display, "{}", instant.with_timezone(&tz).format(&self.datetime_format))
            .map_err(|_| {
                DocketError::Format(format!("invalid datetime format {:?}", self.datetime_format))
            })?;

        Ok(NormalizedTime {
            display,
            offset_label: offset.label(),
            zone,
        })
    }

    /// Like [`normalize`](Self::normalize), but never fails: malformed input
    /// yields the placeholder display value so rendering can carry on.
    pub fn normalize_or_placeholder(&self, datetime: &str, offset: &str) -> NormalizedTime {
        match self.normalize(datetime, offset) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Could not normalize {:?} {:?}: {}", datetime, offset, e);
                NormalizedTime {
                    display: self.placeholder.clone(),
                    offset_label: offset_label(offset).unwrap_or_default(),
                    zone: String::new(),
                }
            }
        }
    }

    pub fn normalize_hearing(&self, hearing: &Hearing) -> NormalizedTime {
        self.normalize_or_placeholder(&hearing.date_time, &hearing.date_time_offset)
    }
}

/// The `Etc/GMT` identifier for a raw offset, sign inverted and minutes dropped.
pub fn zone_for_offset(offset: &str) -> Result<String> {
    RawOffset::parse(offset).map(|o| o.zone_name())
}

/// `"{offset[0:3]}:{offset[3:5]}"` of the raw, non-inverted offset.
pub fn offset_label(offset: &str) -> Result<String> {
    RawOffset::parse(offset).map(|o| o.label())
}

struct RawOffset<'a> {
    raw: &'a str,
    east: bool,
    hours: u32,
}

impl<'a> RawOffset<'a> {
    fn parse(offset: &'a str) -> Result<Self> {
        let raw = offset.trim();
        let bytes = raw.as_bytes();

        if bytes.len() < 5 {
            return Err(DocketError::Format(format!(
                "offset {:?} is shorter than 5 characters",
                offset
            )));
        }

        let east = match bytes[0] {
            b'+' => true,
            b'-' => false,
            _ => {
                return Err(DocketError::Format(format!(
                    "offset {:?} must start with + or -",
                    offset
                )))
            }
        };

        if !bytes[1..5].iter().all(u8::is_ascii_digit) {
            return Err(DocketError::Format(format!(
                "offset {:?} must be a sign followed by HHMM",
                offset
            )));
        }

        let hours = raw[1..3]
            .parse::<u32>()
            .map_err(|e| DocketError::Format(format!("offset {:?}: {}", offset, e)))?;

        Ok(Self { raw, east, hours })
    }

    fn zone_name(&self) -> String {
        let sign = if self.east { '-' } else { '+' };
        format!("Etc/GMT{}{}", sign, self.hours)
    }

    fn label(&self) -> String {
        format!("{}:{}", &self.raw[0..3], &self.raw[3..5])
    }
}

/// RFC 3339 keeps its own offset; naive forms are read as UTC so the result
/// never depends on the host zone.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DocketError::Format(format!("unparsable datetime {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_positive_offset_inverts_sign() {
        assert_eq!(zone_for_offset("+0500").unwrap(), "Etc/GMT-5");
    }

    #[test]
    fn test_negative_offset_inverts_sign() {
        assert_eq!(zone_for_offset("-0800").unwrap(), "Etc/GMT+8");
    }

    #[test]
    fn test_minutes_are_dropped_from_zone() {
        assert_eq!(zone_for_offset("-0330").unwrap(), "Etc/GMT+3");
        assert_eq!(zone_for_offset("+0545").unwrap(), "Etc/GMT-5");
    }

    #[test]
    fn test_label_uses_raw_offset() {
        assert_eq!(offset_label("+0500").unwrap(), "+05:00");
        assert_eq!(offset_label("-0330").unwrap(), "-03:30");
        assert_eq!(offset_label("  -0330 ").unwrap(), "-03:30");
    }

    #[test]
    fn test_normalize_positive_offset() {
        let normalizer = TimeNormalizer::new();
        let result = normalizer.normalize("2020-01-15T03:15:00Z", "+0500").unwrap();

        assert_eq!(result.zone, "Etc/GMT-5");
        assert_eq!(result.offset_label, "+05:00");
        assert_eq!(result.display, "Wednesday, January 15, 2020, 8:15:00 AM");
    }

    #[test]
    fn test_half_hour_offset_label_and_display_disagree() {
        let normalizer = TimeNormalizer::new();
        let result = normalizer.normalize("2020-01-15T03:15:00Z", "-0330").unwrap();

        // Rendered at UTC-3, labelled UTC-03:30.
        assert_eq!(result.offset_label, "-03:30");
        assert_eq!(result.zone, "Etc/GMT+3");
        assert_eq!(result.display, "Wednesday, January 15, 2020, 12:15:00 AM");

        let at_label_offset = DateTime::parse_from_rfc3339("2020-01-15T03:15:00Z")
            .unwrap()
            .with_timezone(&FixedOffset::west_opt(3 * 3600 + 30 * 60).unwrap());
        assert_eq!(at_label_offset.format("%A, %B %-d").to_string(), "Tuesday, January 14");
        assert!(!result.display.starts_with("Tuesday, January 14"));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = TimeNormalizer::new();
        let a = normalizer.normalize("2021-06-01T12:00:00-04:00", "-0400").unwrap();
        let b = normalizer.normalize("2021-06-01T12:00:00-04:00", "-0400").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.display, "Tuesday, June 1, 2021, 12:00:00 PM");
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        let normalizer = TimeNormalizer::new();
        let naive = normalizer.normalize("2020-01-15T03:15:00", "+0000").unwrap();
        let explicit = normalizer.normalize("2020-01-15T03:15:00Z", "+0000").unwrap();
        assert_eq!(naive.display, explicit.display);

        let spaced = normalizer.normalize("2020-01-15 03:15:00.000", "+0000").unwrap();
        assert_eq!(spaced.display, explicit.display);
    }

    #[test]
    fn test_short_offset_is_format_error() {
        let normalizer = TimeNormalizer::new();
        let err = normalizer.normalize("2020-01-15T03:15:00Z", "+050").unwrap_err();
        assert!(matches!(err, DocketError::Format(_)));
    }

    #[test]
    fn test_missing_sign_is_format_error() {
        assert!(matches!(zone_for_offset("05000"), Err(DocketError::Format(_))));
        assert!(matches!(zone_for_offset("+05:00"), Err(DocketError::Format(_))));
    }

    #[test]
    fn test_unparsable_datetime_is_format_error() {
        let normalizer = TimeNormalizer::new();
        let err = normalizer.normalize("next tuesday", "+0500").unwrap_err();
        assert!(matches!(err, DocketError::Format(_)));
    }

    #[test]
    fn test_out_of_range_zone_is_format_error() {
        let normalizer = TimeNormalizer::new();
        let err = normalizer.normalize("2020-01-15T03:15:00Z", "-1300").unwrap_err();
        assert!(matches!(err, DocketError::Format(_)));
    }

    #[test]
    fn test_placeholder_on_bad_datetime_keeps_label() {
        let normalizer = TimeNormalizer::with_format(DEFAULT_DATETIME_FORMAT, "TBD");
        let result = normalizer.normalize_or_placeholder("garbage", "-0330");
        assert_eq!(result.display, "TBD");
        assert_eq!(result.offset_label, "-03:30");
        assert!(result.zone.is_empty());
    }

    #[test]
    fn test_placeholder_on_bad_offset() {
        let normalizer = TimeNormalizer::new();
        let result = normalizer.normalize_or_placeholder("2020-01-15T03:15:00Z", "");
        assert_eq!(result.display, DEFAULT_PLACEHOLDER);
        assert_eq!(result.offset_label, "");
    }

    #[test]
    fn test_custom_format() {
        let normalizer = TimeNormalizer::with_format("%Y-%m-%d %H:%M", DEFAULT_PLACEHOLDER);
        let result = normalizer.normalize("2020-01-15T03:15:00Z", "-0500").unwrap();
        assert_eq!(result.display, "2020-01-14 22:15");
    }
}
