//! Date shifter: move every event's dates by a fixed number of days.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::datetime::{IsoDateTime, date_prefix, shift_date_string};
use crate::document::EventsDocument;
use crate::error::DemoDataResult;
use crate::event::{DateField, EventRecord};

/// One date field moved by the shifter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: DateField,
    pub old: String,
    pub new: String,
}

impl FieldChange {
    /// `scheduledDate: 2025-09-15 -> 2025-10-13`
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {}",
            self.field,
            date_prefix(&self.old),
            date_prefix(&self.new)
        )
    }
}

/// A date value that was left untouched because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWarning {
    pub event_id: Option<String>,
    pub field: DateField,
    pub value: String,
    pub reason: String,
}

/// All field changes made to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventChange {
    pub event_id: Option<String>,
    pub title: Option<String>,
    pub changes: Vec<FieldChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftReport {
    pub days: i64,
    pub changed: Vec<EventChange>,
    pub warnings: Vec<DateWarning>,
}

/// Shift a single date field of `event` in place.
///
/// Absent, null and empty values are skipped (`None`). A value that is not a
/// parseable date string is kept and reported as a warning.
pub(crate) fn shift_field(
    event: &mut EventRecord,
    field: DateField,
    days: i64,
) -> Option<Result<FieldChange, DateWarning>> {
    let value = event.get(field.key())?;

    let old = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) if s.is_empty() => return None,
        serde_json::Value::String(s) => s.clone(),
        other => {
            let value = other.to_string();
            return Some(Err(date_warning(event, field, value, "not a string".into())));
        }
    };

    match shift_date_string(&old, days) {
        Ok(new) => {
            event.set_date(field, new.clone());
            Some(Ok(FieldChange { field, old, new }))
        }
        Err(e) => Some(Err(date_warning(event, field, old, e.to_string()))),
    }
}

fn date_warning(event: &EventRecord, field: DateField, value: String, reason: String) -> DateWarning {
    DateWarning {
        event_id: event.id().map(str::to_string),
        field,
        value,
        reason,
    }
}

/// Shift `scheduledDate`, `endDate` and `nextOccurrence` of every event.
pub fn shift_events(events: &mut [EventRecord], days: i64) -> ShiftReport {
    let mut report = ShiftReport {
        days,
        ..Default::default()
    };

    for event in events.iter_mut() {
        let mut changes = Vec::new();

        for field in DateField::ALL {
            match shift_field(event, field, days) {
                Some(Ok(change)) if change.old != change.new => changes.push(change),
                Some(Ok(_)) | None => {}
                Some(Err(warning)) => {
                    log::warn!(
                        "Could not parse {} '{}' of {}: {}",
                        warning.field,
                        warning.value,
                        warning.event_id.as_deref().unwrap_or("unknown"),
                        warning.reason
                    );
                    report.warnings.push(warning);
                }
            }
        }

        if !changes.is_empty() {
            report.changed.push(EventChange {
                event_id: event.id().map(str::to_string),
                title: event.title().map(str::to_string),
                changes,
            });
        }
    }

    report
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayMismatch {
    pub event_id: Option<String>,
    pub before: NaiveDate,
    /// None when the shifted value no longer parses
    pub after: Option<NaiveDate>,
}

/// Result of the post-shift checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftValidation {
    pub before_count: usize,
    pub after_count: usize,
    pub future: usize,
    pub past: usize,
    pub weekday_matches: usize,
    pub weekday_mismatches: Vec<WeekdayMismatch>,
}

impl ShiftValidation {
    pub fn count_preserved(&self) -> bool {
        self.before_count == self.after_count
    }

    /// Count and weekday checks are fatal; the future/past split is not.
    pub fn passed(&self) -> bool {
        self.count_preserved() && self.weekday_mismatches.is_empty()
    }
}

fn parsed_scheduled_date(event: &EventRecord) -> Option<IsoDateTime> {
    event
        .scheduled_date()
        .filter(|s| !s.is_empty())
        .and_then(|s| IsoDateTime::parse(s).ok())
}

/// Compare events before and after a shift.
pub fn validate_shift(
    before: &[EventRecord],
    after: &[EventRecord],
    now: DateTime<FixedOffset>,
) -> ShiftValidation {
    let mut validation = ShiftValidation {
        before_count: before.len(),
        after_count: after.len(),
        future: 0,
        past: 0,
        weekday_matches: 0,
        weekday_mismatches: Vec::new(),
    };

    for date in after.iter().filter_map(parsed_scheduled_date) {
        if date.is_after(now) {
            validation.future += 1;
        } else {
            validation.past += 1;
        }
    }

    for (old_event, new_event) in before.iter().zip(after) {
        // Unparseable originals were reported as warnings and never moved
        let Some(old_date) = parsed_scheduled_date(old_event) else {
            continue;
        };

        let new_date = parsed_scheduled_date(new_event);
        if new_date.map(|d| d.weekday()) == Some(old_date.weekday()) {
            validation.weekday_matches += 1;
        } else {
            validation.weekday_mismatches.push(WeekdayMismatch {
                event_id: new_event.id().map(str::to_string),
                before: old_date.date(),
                after: new_date.map(|d| d.date()),
            });
        }
    }

    validation
}

/// Where the shifter reads, backs up and writes.
#[derive(Debug, Clone)]
pub struct ShiftJob {
    pub events_file: PathBuf,
    pub backup_file: PathBuf,
    pub days: i64,
    /// Replaces `_comment` entirely when set
    pub comment: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct ShiftOutcome {
    pub loaded: usize,
    pub report: ShiftReport,
    pub validation: ShiftValidation,
    pub backup_written: bool,
    pub saved: bool,
}

impl ShiftJob {
    /// Load, back up, shift, validate and (when validation passes) save.
    ///
    /// A failed validation is not an error here: the outcome comes back with
    /// `saved == false` and the events file untouched.
    pub fn run(&self, now: DateTime<FixedOffset>) -> DemoDataResult<ShiftOutcome> {
        let mut doc = EventsDocument::load(&self.events_file)?;
        let loaded = doc.events.len();

        let backup_written = !self.dry_run;
        if backup_written {
            doc.save(&self.backup_file)?;
            log::info!("Backup written to {}", self.backup_file.display());
        }

        let original = doc.events.clone();
        let report = shift_events(&mut doc.events, self.days);
        let validation = validate_shift(&original, &doc.events, now);

        match &self.comment {
            Some(comment) => doc.set_comment(comment.clone()),
            None => doc.annotate_comment(&format!(
                "All dates shifted {:+} days ({}).",
                self.days,
                now.format("%B %-d, %Y")
            )),
        }

        let saved = validation.passed() && !self.dry_run;
        if saved {
            doc.save(&self.events_file)?;
        } else if !validation.passed() {
            log::info!(
                "Validation failed, leaving {} unmodified",
                self.events_file.display()
            );
        }

        Ok(ShiftOutcome {
            loaded,
            report,
            validation,
            backup_written,
            saved,
        })
    }
}
