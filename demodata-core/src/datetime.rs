//! ISO-8601 date strings as stored in the events file.
//!
//! Values are handled timezone-naively: whatever shape a string was parsed
//! from (date only, floating datetime, datetime with offset) is the shape it
//! is written back in after arithmetic.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Timelike,
    Weekday,
};
use thiserror::Error;

/// Offset datetimes RFC 3339 rejects because the seconds are missing.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Floating datetime layouts accepted in addition to RFC 3339.
const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug)]
pub enum DateShiftError {
    #[error("{0}")]
    Parse(#[from] chrono::ParseError),

    #[error("shifted date is out of range")]
    OutOfRange,
}

/// A parsed date or datetime string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDateTime {
    /// `2025-10-13`
    Date(NaiveDate),
    /// `2025-10-13T09:00:00`
    Floating(NaiveDateTime),
    /// `2025-10-13T09:00:00+11:00` or `2025-10-13T09:00:00Z`
    Offset {
        datetime: DateTime<FixedOffset>,
        utc_suffix: bool,
    },
}

impl IsoDateTime {
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return Ok(IsoDateTime::Offset {
                datetime,
                utc_suffix: s.ends_with('Z') || s.ends_with('z'),
            });
        }

        for format in OFFSET_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(s, format) {
                return Ok(IsoDateTime::Offset {
                    datetime,
                    utc_suffix: false,
                });
            }
        }

        if s.len() == 10
            && let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        {
            return Ok(IsoDateTime::Date(date));
        }

        let err = match NaiveDateTime::parse_from_str(s, FLOATING_FORMATS[0]) {
            Ok(dt) => return Ok(IsoDateTime::Floating(dt)),
            Err(e) => e,
        };

        for format in &FLOATING_FORMATS[1..] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(IsoDateTime::Floating(dt));
            }
        }

        Err(err)
    }

    /// Move the value by a (possibly negative) number of days.
    pub fn shift_days(&self, days: i64) -> Option<Self> {
        let delta = Duration::try_days(days)?;

        let shifted = match *self {
            IsoDateTime::Date(d) => IsoDateTime::Date(d.checked_add_signed(delta)?),
            IsoDateTime::Floating(dt) => IsoDateTime::Floating(dt.checked_add_signed(delta)?),
            IsoDateTime::Offset {
                datetime,
                utc_suffix,
            } => IsoDateTime::Offset {
                datetime: datetime.checked_add_signed(delta)?,
                utc_suffix,
            },
        };

        Some(shifted)
    }

    /// Calendar date in the value's own timezone.
    pub fn date(&self) -> NaiveDate {
        match self {
            IsoDateTime::Date(d) => *d,
            IsoDateTime::Floating(dt) => dt.date(),
            IsoDateTime::Offset { datetime, .. } => datetime.date_naive(),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date().weekday()
    }

    /// Whether the value lies strictly after `now`.
    ///
    /// Date-only and floating values are compared against the wall clock
    /// of `now`; values with an offset are compared as instants.
    pub fn is_after(&self, now: DateTime<FixedOffset>) -> bool {
        match self {
            IsoDateTime::Date(d) => d.and_time(chrono::NaiveTime::MIN) > now.naive_local(),
            IsoDateTime::Floating(dt) => *dt > now.naive_local(),
            IsoDateTime::Offset { datetime, .. } => *datetime > now,
        }
    }
}

impl fmt::Display for IsoDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsoDateTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            IsoDateTime::Floating(dt) if dt.nanosecond() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))
            }
            IsoDateTime::Floating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6f")),
            IsoDateTime::Offset {
                datetime,
                utc_suffix,
            } => write!(f, "{}", datetime.to_rfc3339_opts(SecondsFormat::AutoSi, *utc_suffix)),
        }
    }
}

/// Shift an ISO date string by `days`, keeping its shape.
pub fn shift_date_string(s: &str, days: i64) -> Result<String, DateShiftError> {
    let parsed = IsoDateTime::parse(s)?;
    let shifted = parsed.shift_days(days).ok_or(DateShiftError::OutOfRange)?;
    Ok(shifted.to_string())
}

/// First ten characters of a date string (`YYYY-MM-DD` for well-formed values).
pub fn date_prefix(s: &str) -> &str {
    s.char_indices().nth(10).map_or(s, |(idx, _)| &s[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn floating_datetime_keeps_its_shape() {
        assert_eq!(
            shift_date_string("2025-09-15T10:00:00", 28).unwrap(),
            "2025-10-13T10:00:00"
        );
    }

    #[test]
    fn shift_round_trips() {
        for original in [
            "2025-09-15T10:00:00",
            "2025-10-13T09:30:15.250000",
            "2025-02-10T23:59:59",
            "2024-02-29",
            "2025-10-13T09:00:00+11:00",
            "2025-10-13T09:00:00Z",
        ] {
            let forward = shift_date_string(original, 28).unwrap();
            assert_ne!(forward, original);
            assert_eq!(shift_date_string(&forward, -28).unwrap(), original);
        }
    }

    #[test]
    fn shift_by_four_weeks_keeps_weekday() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        while date < end {
            let value = IsoDateTime::Floating(date.and_hms_opt(9, 0, 0).unwrap());
            assert_eq!(value.weekday(), value.shift_days(28).unwrap().weekday());
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn subtracting_eight_days_crosses_into_previous_week() {
        assert_eq!(
            shift_date_string("2025-10-13T09:00:00", -8).unwrap(),
            "2025-10-05T09:00:00"
        );
    }

    #[test]
    fn accepts_minutes_and_space_separator() {
        assert_eq!(shift_date_string("2025-10-13T09:00", 1).unwrap(), "2025-10-14T09:00:00");
        assert_eq!(shift_date_string("2025-10-13 09:00:00", 1).unwrap(), "2025-10-14T09:00:00");
    }

    #[test]
    fn month_and_year_boundaries() {
        assert_eq!(shift_date_string("2025-12-20T08:00:00", 28).unwrap(), "2026-01-17T08:00:00");
        assert_eq!(shift_date_string("2025-10-01", -8).unwrap(), "2025-09-23");
    }

    #[test]
    fn offset_is_preserved() {
        assert_eq!(
            shift_date_string("2025-10-13T09:00:00+11:00", 7).unwrap(),
            "2025-10-20T09:00:00+11:00"
        );
        assert_eq!(shift_date_string("2025-10-13T09:00:00Z", 7).unwrap(), "2025-10-20T09:00:00Z");
    }

    #[test]
    fn offset_without_seconds_is_accepted() {
        assert_eq!(
            shift_date_string("2025-10-13T09:00+11:00", 28).unwrap(),
            "2025-11-10T09:00:00+11:00"
        );
        let parsed = IsoDateTime::parse("2025-10-13T09:00+11:00").unwrap();
        assert!(matches!(parsed, IsoDateTime::Offset { .. }));
        assert_eq!(parsed.weekday(), Weekday::Mon);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(shift_date_string("next tuesday", 28).is_err());
        assert!(shift_date_string("2025-13-40T00:00:00", 28).is_err());
        assert!(shift_date_string("", 28).is_err());
    }

    #[test]
    fn out_of_range_shift_is_an_error() {
        assert!(matches!(
            shift_date_string("2025-10-13", i64::MAX),
            Err(DateShiftError::OutOfRange)
        ));
    }

    #[test]
    fn is_after_compares_wall_clock_for_floating_values() {
        let now = FixedOffset::east_opt(11 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 10, 11, 12, 0, 0)
            .unwrap();

        assert!(IsoDateTime::parse("2025-10-11T12:30:00").unwrap().is_after(now));
        assert!(!IsoDateTime::parse("2025-10-11T11:30:00").unwrap().is_after(now));
        assert!(!IsoDateTime::parse("2025-10-11").unwrap().is_after(now));
        assert!(IsoDateTime::parse("2025-10-12").unwrap().is_after(now));
        // 02:00Z is 13:00 at +11:00
        assert!(IsoDateTime::parse("2025-10-11T02:00:00Z").unwrap().is_after(now));
    }

    #[test]
    fn date_prefix_takes_ten_characters() {
        assert_eq!(date_prefix("2025-10-13T09:00:00"), "2025-10-13");
        assert_eq!(date_prefix("2025-10"), "2025-10");
        assert_eq!(date_prefix(""), "");
    }
}
