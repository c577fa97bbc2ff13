//! Event records of the demo dataset.
//!
//! The schema is open: besides the handful of fields the tools understand,
//! a record may carry anything, and all of it is written back verbatim in
//! its original key order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::EVENT_ID_PREFIX;

/// Date-valued fields the tools know how to shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    ScheduledDate,
    EndDate,
    NextOccurrence,
}

impl DateField {
    pub const ALL: [DateField; 3] = [
        DateField::ScheduledDate,
        DateField::EndDate,
        DateField::NextOccurrence,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateField::ScheduledDate => "scheduledDate",
            DateField::EndDate => "endDate",
            DateField::NextOccurrence => "nextOccurrence",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single calendar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        EventRecord(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn category(&self) -> Option<&str> {
        self.get_str("category")
    }

    pub fn date(&self, field: DateField) -> Option<&str> {
        self.get_str(field.key())
    }

    pub fn set_date(&mut self, field: DateField, value: String) {
        self.set(field.key(), value);
    }

    pub fn scheduled_date(&self) -> Option<&str> {
        self.date(DateField::ScheduledDate)
    }

    /// `isRecurring`, treating anything but `true` as false.
    pub fn is_recurring(&self) -> bool {
        self.flag("isRecurring")
    }

    pub fn is_recurring_instance(&self) -> bool {
        self.flag("isRecurringInstance")
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Numeric suffix of a conventional `event_<N>` id.
    pub fn id_number(&self) -> Option<u64> {
        self.id().and_then(parse_event_number)
    }
}

impl From<Map<String, Value>> for EventRecord {
    fn from(fields: Map<String, Value>) -> Self {
        EventRecord(fields)
    }
}

/// The `N` of a conventional `event_<N>` id, as written.
pub fn event_number_digits(id: &str) -> Option<&str> {
    let digits = id.strip_prefix(EVENT_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Parse `event_<N>` into N. Anything else, or an N beyond `u64`, yields None.
pub fn parse_event_number(id: &str) -> Option<u64> {
    event_number_digits(id)?.parse().ok()
}

pub fn format_event_id(number: u64) -> String {
    format!("{}{}", EVENT_ID_PREFIX, number)
}

/// Truncate a title to at most `max` characters for display.
pub fn truncate_title(title: &str, max: usize) -> &str {
    title.char_indices().nth(max).map_or(title, |(idx, _)| &title[..idx])
}
