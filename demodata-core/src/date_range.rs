//! Inclusive date range for selecting events.

use chrono::NaiveDate;

use crate::datetime::date_prefix;
use crate::error::{DemoDataError, DemoDataResult};

/// Inclusive range of calendar dates, both ends `YYYY-MM-DD`.
///
/// Matching compares the first ten characters of an event's date string
/// lexicographically against the bounds. That is the same as comparing dates
/// as long as the stored strings use the fixed-width ISO layout; a malformed
/// string simply sorts wherever its characters put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    from: String,
    to: String,
}

impl DateRange {
    /// Build a range from two `YYYY-MM-DD` strings.
    pub fn from_args(from: &str, to: &str) -> DemoDataResult<Self> {
        let from_date = parse_date(from)?;
        let to_date = parse_date(to)?;

        if from_date > to_date {
            return Err(DemoDataError::InvalidRange(format!(
                "{} is after {}",
                from, to
            )));
        }

        Ok(DateRange {
            from: from_date.format("%Y-%m-%d").to_string(),
            to: to_date.format("%Y-%m-%d").to_string(),
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether the date portion of `date_string` falls inside the range.
    pub fn contains(&self, date_string: &str) -> bool {
        let date = date_prefix(date_string);
        self.from.as_str() <= date && date <= self.to.as_str()
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> DemoDataResult<NaiveDate> {
    if s.len() != 10 {
        return Err(DemoDataError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DemoDataError::InvalidDate(s.to_string()))
}
