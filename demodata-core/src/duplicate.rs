//! Week duplicator: copy a week of events into an earlier window.

use std::path::PathBuf;

use crate::date_range::DateRange;
use crate::document::EventsDocument;
use crate::error::{DemoDataError, DemoDataResult};
use crate::event::{DateField, EventRecord, event_number_digits, format_event_id};
use crate::shift::{DateWarning, shift_field};

/// Which events to copy and how far back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFilter {
    pub category: String,
    pub range: DateRange,
    /// Days subtracted from the copies' dates
    pub days: i64,
}

impl DuplicateFilter {
    /// Category matches and the `scheduledDate` date prefix is within the range.
    pub fn matches(&self, event: &EventRecord) -> bool {
        event.category() == Some(self.category.as_str())
            && event
                .scheduled_date()
                .is_some_and(|date| self.range.contains(date))
    }
}

/// Events selected for duplication, ordered by `scheduledDate`.
pub fn select_events<'a>(events: &'a [EventRecord], filter: &DuplicateFilter) -> Vec<&'a EventRecord> {
    let mut selected: Vec<_> = events.iter().filter(|e| filter.matches(e)).collect();
    selected.sort_by(|a, b| a.scheduled_date().cmp(&b.scheduled_date()));
    selected
}

/// First free number for `event_<N>` ids: one past the highest in use.
/// Ids that do not follow the convention are ignored.
///
/// Fails when the highest id leaves no room for another number.
pub fn next_event_number(events: &[EventRecord]) -> DemoDataResult<u64> {
    let mut highest: Option<u64> = None;

    for id in events.iter().filter_map(EventRecord::id) {
        let Some(digits) = event_number_digits(id) else {
            continue;
        };
        let number: u64 = digits.parse().map_err(|_| ids_exhausted(id))?;
        highest = highest.max(Some(number));
    }

    match highest {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ids_exhausted(&format_event_id(max))),
    }
}

fn ids_exhausted(id: &str) -> DemoDataError {
    DemoDataError::InvalidDocument(format!("no event ids left after {}", id))
}

/// Copy `source` under `new_id`, moved back by `days`.
///
/// The copy is a one-off: `nextOccurrence` is dropped, and a recurring source
/// turns into a recurring instance pointing back at its parent.
pub fn duplicate_event(
    source: &EventRecord,
    new_id: &str,
    days: i64,
    warnings: &mut Vec<DateWarning>,
) -> EventRecord {
    let mut copy = source.clone();
    copy.set("id", new_id);

    for field in [DateField::ScheduledDate, DateField::EndDate] {
        // i64::MIN saturates to an offset no date survives, so it is reported
        if let Some(Err(mut warning)) = shift_field(&mut copy, field, days.saturating_neg()) {
            // Report against the event the value came from
            warning.event_id = source.id().map(str::to_string);
            log::warn!(
                "Could not parse {} '{}' of {}: {}",
                warning.field,
                warning.value,
                warning.event_id.as_deref().unwrap_or("unknown"),
                warning.reason
            );
            warnings.push(warning);
        }
    }

    copy.remove(DateField::NextOccurrence.key());

    if copy.is_recurring() {
        copy.set("isRecurringInstance", true);
        copy.set("isRecurring", false);
        if !copy.contains("parentEventId")
            && let Some(parent) = source.id()
        {
            copy.set("parentEventId", parent);
        }
    }

    copy
}

/// One copy made by the duplicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplication {
    pub source_id: Option<String>,
    pub new_id: String,
    pub title: Option<String>,
    pub old_date: Option<String>,
    pub new_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub duplicated: Vec<Duplication>,
    pub warnings: Vec<DateWarning>,
    /// Number the first copy was given
    pub first_number: u64,
}

impl DuplicateReport {
    /// `(first, last)` ids handed out, if any.
    pub fn id_range(&self) -> Option<(String, String)> {
        let count = self.duplicated.len() as u64;
        let last = self.first_number.checked_add(count.checked_sub(1)?)?;
        Some((format_event_id(self.first_number), format_event_id(last)))
    }
}

/// Append copies of every matching event to `events`.
///
/// Nothing is appended when the new ids would not fit.
pub fn duplicate_events(
    events: &mut Vec<EventRecord>,
    filter: &DuplicateFilter,
) -> DemoDataResult<DuplicateReport> {
    let first_number = next_event_number(events)?;
    let mut report = DuplicateReport {
        first_number,
        ..Default::default()
    };

    let selected = select_events(events, filter);
    if let Some(extra) = (selected.len() as u64).checked_sub(1) {
        first_number
            .checked_add(extra)
            .ok_or_else(|| ids_exhausted(&format_event_id(first_number)))?;
    }

    let copies: Vec<EventRecord> = selected
        .into_iter()
        .enumerate()
        .map(|(offset, source)| {
            let new_id = format_event_id(first_number + offset as u64);
            let copy = duplicate_event(source, &new_id, filter.days, &mut report.warnings);

            report.duplicated.push(Duplication {
                source_id: source.id().map(str::to_string),
                new_id,
                title: source.title().map(str::to_string),
                old_date: source.scheduled_date().map(str::to_string),
                new_date: copy.scheduled_date().map(str::to_string),
            });

            copy
        })
        .collect();

    events.extend(copies);
    Ok(report)
}

/// Where the duplicator reads, backs up and writes.
#[derive(Debug, Clone)]
pub struct DuplicateJob {
    pub events_file: PathBuf,
    pub backup_file: PathBuf,
    pub filter: DuplicateFilter,
    /// Replaces `_comment` entirely when set
    pub comment: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct DuplicateOutcome {
    pub loaded: usize,
    pub total: usize,
    pub report: DuplicateReport,
    pub backup_written: bool,
    pub saved: bool,
}

impl DuplicateJob {
    pub fn run(&self) -> DemoDataResult<DuplicateOutcome> {
        let mut doc = EventsDocument::load(&self.events_file)?;
        let loaded = doc.events.len();

        let backup_written = !self.dry_run;
        if backup_written {
            doc.save(&self.backup_file)?;
            log::info!("Backup written to {}", self.backup_file.display());
        }

        let report = duplicate_events(&mut doc.events, &self.filter)?;

        match &self.comment {
            Some(comment) => doc.set_comment(comment.clone()),
            None if !report.duplicated.is_empty() => doc.annotate_comment(&format!(
                "{} events from {} to {} duplicated {} days earlier.",
                capitalize(&self.filter.category),
                self.filter.range.from(),
                self.filter.range.to(),
                self.filter.days
            )),
            None => {}
        }

        let saved = !self.dry_run;
        if saved {
            doc.save(&self.events_file)?;
        }

        Ok(DuplicateOutcome {
            loaded,
            total: doc.events.len(),
            report,
            backup_written,
            saved,
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
