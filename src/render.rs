//! Terminal rendering for job reports.
//!
//! Extension traits that turn demodata-core reports into colored console
//! lines using owo_colors. The core crate never prints.

use demodata_core::check::{CheckReport, CheckStats};
use demodata_core::datetime::date_prefix;
use demodata_core::duplicate::{DuplicateReport, Duplication};
use demodata_core::event::truncate_title;
use demodata_core::shift::{DateWarning, EventChange, ShiftReport, ShiftValidation};
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 80;

/// Titles are cut to this many characters in shift listings
const SHIFT_TITLE_WIDTH: usize = 40;
/// ... and to this many in duplication listings
const DUPLICATE_TITLE_WIDTH: usize = 50;

pub trait Render {
    fn render(&self) -> String;
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn thin_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn ok(message: impl AsRef<str>) -> String {
    format!("{} {}", "[OK]".green(), message.as_ref())
}

pub fn warn(message: impl AsRef<str>) -> String {
    format!("{} {}", "[WARN]".yellow(), message.as_ref())
}

pub fn error(message: impl AsRef<str>) -> String {
    format!("{} {}", "[ERROR]".red(), message.as_ref())
}

/// Banner printed before a job starts.
pub fn banner(title: &str, details: &[(&str, String)]) -> String {
    let mut lines = vec![rule(), title.bold().to_string(), rule()];
    for (label, value) in details {
        lines.push(format!("{}: {}", label, value));
    }
    lines.push(rule());
    lines.join("\n")
}

/// Section header, e.g. "VALIDATION CHECKS".
pub fn section(title: &str) -> String {
    format!("\n{}\n{}\n{}", rule(), title.bold(), rule())
}

impl Render for DateWarning {
    fn render(&self) -> String {
        format!(
            "  {}",
            warn(format!(
                "Could not parse {} '{}' of {}: {}",
                self.field,
                self.value,
                self.event_id.as_deref().unwrap_or("unknown"),
                self.reason
            ))
        )
    }
}

impl Render for EventChange {
    fn render(&self) -> String {
        let id = self.event_id.as_deref().unwrap_or("unknown");
        let title = truncate_title(self.title.as_deref().unwrap_or("No title"), SHIFT_TITLE_WIDTH);

        let mut lines = vec![format!("  {}", ok(format!("{}: {}", id, title)))];
        for change in &self.changes {
            lines.push(format!("    - {}", change.summary().dimmed()));
        }
        lines.join("\n")
    }
}

impl Render for ShiftReport {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self.changed.iter().map(Render::render).collect();
        lines.extend(self.warnings.iter().map(Render::render));

        if lines.is_empty() {
            lines.push("  No dates to shift".dimmed().to_string());
        }
        lines.join("\n")
    }
}

impl Render for ShiftValidation {
    fn render(&self) -> String {
        let mut lines = vec![section("VALIDATION CHECKS")];

        if !self.count_preserved() {
            lines.push(error(format!(
                "Event count mismatch: {} -> {}",
                self.before_count, self.after_count
            )));
            return lines.join("\n");
        }
        lines.push(ok(format!("Event count preserved: {} events", self.after_count)));

        lines.push(ok(format!("Events in future: {}", self.future)));
        if self.past > 0 {
            lines.push(warn(format!("Events still in past: {}", self.past)));
        }

        for mismatch in &self.weekday_mismatches {
            let after = mismatch
                .after
                .map_or_else(|| "unparseable".to_string(), |d| d.format("%A").to_string());
            lines.push(format!(
                "  {}",
                warn(format!(
                    "Day mismatch for {}: {} -> {}",
                    mismatch.event_id.as_deref().unwrap_or("unknown"),
                    mismatch.before.format("%A"),
                    after
                ))
            ));
        }

        lines.push(ok(format!("Day-of-week preserved: {} events", self.weekday_matches)));
        if !self.weekday_mismatches.is_empty() {
            lines.push(error(format!(
                "Day-of-week mismatches: {}",
                self.weekday_mismatches.len()
            )));
        } else {
            lines.push(format!("\n{}", ok("All validation checks passed!")));
        }

        lines.join("\n")
    }
}

impl Render for Duplication {
    fn render(&self) -> String {
        let title = truncate_title(self.title.as_deref().unwrap_or("No title"), DUPLICATE_TITLE_WIDTH);
        let old_date = self.old_date.as_deref().map_or("", date_prefix);
        let new_date = self.new_date.as_deref().map_or("", date_prefix);

        format!(
            "  {}: {}\n    {}",
            self.new_id.green(),
            title,
            format!("{} -> {}", old_date, new_date).dimmed()
        )
    }
}

impl Render for DuplicateReport {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self.duplicated.iter().map(Render::render).collect();
        lines.extend(self.warnings.iter().map(Render::render));

        if self.duplicated.is_empty() {
            lines.push("  No matching events".dimmed().to_string());
        }
        lines.join("\n")
    }
}

impl Render for CheckStats {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("Total events: {}", self.total),
            format!("Recurring events: {}", self.recurring),
            format!("Recurring instances: {}", self.recurring_instances),
        ];
        for (category, count) in &self.by_category {
            lines.push(format!("  {}: {}", category, count).dimmed().to_string());
        }
        lines.join("\n")
    }
}

impl Render for CheckReport {
    fn render(&self) -> String {
        let mut lines = vec![self.stats.render()];

        let errors: Vec<_> = self.errors().collect();
        let warnings: Vec<_> = self.warnings().collect();

        if !warnings.is_empty() {
            lines.push(String::new());
            lines.extend(warnings.iter().map(|w| format!("  {}", warn(w.message()))));
        }
        if !errors.is_empty() {
            lines.push(String::new());
            lines.extend(errors.iter().map(|e| format!("  {}", error(e.message()))));
        }

        lines.push(String::new());
        if errors.is_empty() {
            lines.push(ok(format!(
                "No integrity errors ({} {})",
                warnings.len(),
                pluralize("warning", warnings.len())
            )));
        } else {
            lines.push(error(format!(
                "{} {}, {} {}",
                errors.len(),
                pluralize("error", errors.len()),
                warnings.len(),
                pluralize("warning", warnings.len())
            )));
        }

        lines.join("\n")
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demodata_core::event::DateField;
    use chrono::NaiveDate;
    use demodata_core::shift::{FieldChange, WeekdayMismatch};

    #[test]
    fn pluralize_words() {
        assert_eq!(pluralize("error", 1), "error");
        assert_eq!(pluralize("warning", 0), "warnings");
        assert_eq!(pluralize("warning", 3), "warnings");
    }

    #[test]
    fn event_change_lists_each_field() {
        let change = EventChange {
            event_id: Some("event_4".into()),
            title: Some("A very long seminar title that keeps going and going".into()),
            changes: vec![FieldChange {
                field: DateField::ScheduledDate,
                old: "2025-09-15T10:00:00".into(),
                new: "2025-10-13T10:00:00".into(),
            }],
        };

        let rendered = change.render();
        assert!(rendered.contains("event_4: A very long seminar title that keeps go"));
        assert!(!rendered.contains("going and going"));
        assert!(rendered.contains("scheduledDate: 2025-09-15 -> 2025-10-13"));
    }

    #[test]
    fn validation_failure_names_the_weekdays() {
        let validation = ShiftValidation {
            before_count: 2,
            after_count: 2,
            future: 2,
            past: 0,
            weekday_matches: 1,
            weekday_mismatches: vec![WeekdayMismatch {
                event_id: Some("event_2".into()),
                before: NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
                after: NaiveDate::from_ymd_opt(2025, 9, 18),
            }],
        };

        let rendered = validation.render();
        assert!(rendered.contains("Day mismatch for event_2: Monday -> Thursday"));
        assert!(rendered.contains("Day-of-week mismatches: 1"));
        assert!(!rendered.contains("All validation checks passed"));
    }

    #[test]
    fn unparseable_shifted_date_is_named() {
        let validation = ShiftValidation {
            before_count: 1,
            after_count: 1,
            future: 0,
            past: 0,
            weekday_matches: 0,
            weekday_mismatches: vec![WeekdayMismatch {
                event_id: None,
                before: NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(),
                after: None,
            }],
        };

        assert!(validation.render().contains("Day mismatch for unknown: Sunday -> unparseable"));
    }

    #[test]
    fn duplication_shows_date_move() {
        let duplication = Duplication {
            source_id: Some("event_12".into()),
            new_id: "event_111".into(),
            title: Some("COMP1511 Lecture".into()),
            old_date: Some("2025-10-13T09:00:00".into()),
            new_date: Some("2025-10-05T09:00:00".into()),
        };

        let rendered = duplication.render();
        assert!(rendered.contains("COMP1511 Lecture"));
        assert!(rendered.contains("2025-10-13 -> 2025-10-05"));
    }
}
