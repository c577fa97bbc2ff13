//! Read-only integrity check of the events collection.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::constants::{CATEGORY_SUBTYPES, KNOWN_CATEGORIES, PRIVACY_LEVELS, REQUIRED_EVENT_FIELDS};
use crate::datetime::IsoDateTime;
use crate::event::{DateField, EventRecord, event_number_digits};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DuplicateId { id: String, count: usize },
    MissingId { index: usize },
    MissingField { event: String, field: &'static str },
    UnknownCategory { event: String, category: String },
    InvalidSubType { event: String, category: String, sub_type: String },
    InvalidPrivacyLevel { event: String, level: String },
    /// A recurring instance that still looks like a recurrence source
    InstanceStillRecurring { event: String },
    EndBeforeStart { event: String },
    UnparseableDate { event: String, field: DateField, value: String },
    UnconventionalId { id: String },
}

impl Issue {
    /// Errors make the check fail; everything else is a warning.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Issue::UnparseableDate { .. } | Issue::UnconventionalId { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            Issue::DuplicateId { id, count } => format!("Duplicate id {} ({} events)", id, count),
            Issue::MissingId { index } => format!("Event at index {} has no id", index),
            Issue::MissingField { event, field } => {
                format!("{}: Missing required field \"{}\"", event, field)
            }
            Issue::UnknownCategory { event, category } => {
                format!("{}: Invalid category \"{}\"", event, category)
            }
            Issue::InvalidSubType {
                event,
                category,
                sub_type,
            } => format!(
                "{}: Invalid subType \"{}\" for category \"{}\"",
                event, sub_type, category
            ),
            Issue::InvalidPrivacyLevel { event, level } => {
                format!("{}: Invalid privacy level \"{}\"", event, level)
            }
            Issue::InstanceStillRecurring { event } => format!(
                "{}: recurring instance still carries nextOccurrence or isRecurring",
                event
            ),
            Issue::EndBeforeStart { event } => format!("{}: endDate is before scheduledDate", event),
            Issue::UnparseableDate { event, field, value } => {
                format!("{}: Could not parse {} '{}'", event, field, value)
            }
            Issue::UnconventionalId { id } => format!("{}: id does not follow event_<N>", id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub total: usize,
    pub recurring: usize,
    pub recurring_instances: usize,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub issues: Vec<Issue>,
    pub stats: CheckStats,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

fn label(event: &EventRecord, index: usize) -> String {
    event
        .id()
        .map(str::to_string)
        .unwrap_or_else(|| format!("events[{}]", index))
}

/// Absent, null, false, zero and blank strings all count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn allowed_subtypes(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_SUBTYPES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subtypes)| *subtypes)
}

pub fn check_events(events: &[EventRecord]) -> CheckReport {
    let mut report = CheckReport::default();
    report.stats.total = events.len();

    let mut id_counts: HashMap<&str, usize> = HashMap::new();
    let mut id_order: Vec<&str> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let name = label(event, index);

        match event.id() {
            Some(id) => {
                let count = id_counts.entry(id).or_insert(0);
                if *count == 0 {
                    id_order.push(id);
                }
                *count += 1;
                if event_number_digits(id).is_none() {
                    report.issues.push(Issue::UnconventionalId { id: id.to_string() });
                }
            }
            None => report.issues.push(Issue::MissingId { index }),
        }

        for &field in REQUIRED_EVENT_FIELDS {
            if is_blank(event.get(field)) {
                report.issues.push(Issue::MissingField {
                    event: name.clone(),
                    field,
                });
            }
        }

        if let Some(category) = event.category() {
            *report.stats.by_category.entry(category.to_string()).or_insert(0) += 1;
            if !KNOWN_CATEGORIES.contains(&category) {
                report.issues.push(Issue::UnknownCategory {
                    event: name.clone(),
                    category: category.to_string(),
                });
            }

            if let Some(sub_type) = event.get_str("subType").filter(|s| !s.is_empty())
                && let Some(allowed) = allowed_subtypes(category)
                && !allowed.contains(&sub_type)
            {
                report.issues.push(Issue::InvalidSubType {
                    event: name.clone(),
                    category: category.to_string(),
                    sub_type: sub_type.to_string(),
                });
            }
        }

        if let Some(level) = event.get_str("privacyLevel").filter(|s| !s.is_empty())
            && !PRIVACY_LEVELS.contains(&level)
        {
            report.issues.push(Issue::InvalidPrivacyLevel {
                event: name.clone(),
                level: level.to_string(),
            });
        }

        if event.is_recurring() {
            report.stats.recurring += 1;
        }
        if event.is_recurring_instance() {
            report.stats.recurring_instances += 1;
            if event.is_recurring() || event.contains(DateField::NextOccurrence.key()) {
                report
                    .issues
                    .push(Issue::InstanceStillRecurring { event: name.clone() });
            }
        }

        let mut parsed = HashMap::new();
        for field in DateField::ALL {
            let Some(value) = event.date(field).filter(|v| !v.is_empty()) else {
                continue;
            };
            match IsoDateTime::parse(value) {
                Ok(date) => {
                    parsed.insert(field.key(), date);
                }
                Err(_) => report.issues.push(Issue::UnparseableDate {
                    event: name.clone(),
                    field,
                    value: value.to_string(),
                }),
            }
        }

        if let (Some(start), Some(end)) = (
            parsed.get(DateField::ScheduledDate.key()),
            parsed.get(DateField::EndDate.key()),
        ) && end.date() < start.date()
        {
            report.issues.push(Issue::EndBeforeStart { event: name });
        }
    }

    for id in id_order {
        let count = id_counts[id];
        if count > 1 {
            report.issues.push(Issue::DuplicateId {
                id: id.to_string(),
                count,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        serde_json::from_value(value).unwrap()
    }

    /// A record with every required field filled in unless `value` sets it.
    fn event(value: Value) -> EventRecord {
        let mut event = record(value);
        for (key, default) in [
            ("title", "Weekly seminar"),
            ("category", "academic"),
            ("subType", "seminar"),
            ("location", "CB11.04.401"),
            ("creatorId", "user_1"),
        ] {
            if !event.contains(key) {
                event.set(key, default);
            }
        }
        event
    }

    #[test]
    fn clean_dataset_passes() {
        let events = vec![
            event(json!({
                "id": "event_1",
                "category": "academic",
                "scheduledDate": "2025-10-13T09:00:00",
                "endDate": "2025-10-13T11:00:00",
                "isRecurring": true,
                "nextOccurrence": "2025-10-20T09:00:00",
            })),
            event(json!({
                "id": "event_2",
                "category": "academic",
                "scheduledDate": "2025-10-05T09:00:00",
                "isRecurring": false,
                "isRecurringInstance": true,
                "parentEventId": "event_1",
            })),
        ];

        let report = check_events(&events);
        assert!(report.is_valid(), "{:?}", report.issues);
        assert!(report.issues.is_empty());
        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.recurring, 1);
        assert_eq!(report.stats.recurring_instances, 1);
        assert_eq!(report.stats.by_category.get("academic"), Some(&2));
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let events = vec![
            event(json!({ "id": "event_1" })),
            event(json!({ "id": "event_2" })),
            event(json!({ "id": "event_1" })),
        ];

        let report = check_events(&events);
        assert!(!report.is_valid());
        assert_eq!(
            report.issues,
            vec![Issue::DuplicateId {
                id: "event_1".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn instance_with_next_occurrence_is_an_error() {
        let events = vec![event(json!({
            "id": "event_5",
            "isRecurringInstance": true,
            "nextOccurrence": "2025-10-20T09:00:00",
        }))];

        let report = check_events(&events);
        assert_eq!(
            report.errors().cloned().collect::<Vec<_>>(),
            vec![Issue::InstanceStillRecurring {
                event: "event_5".into()
            }]
        );
    }

    #[test]
    fn category_and_date_problems() {
        let events = vec![
            event(json!({ "id": "event_1", "category": "sports", "subType": "match" })),
            event(json!({
                "id": "event_2",
                "scheduledDate": "2025-10-14T09:00:00",
                "endDate": "2025-10-13T09:00:00",
            })),
            event(json!({ "id": "event_3", "scheduledDate": "tbc" })),
            event(json!({ "title": "anonymous" })),
            event(json!({ "id": "legacy-1" })),
        ];

        let report = check_events(&events);
        let errors: Vec<_> = report.errors().cloned().collect();
        let warnings: Vec<_> = report.warnings().cloned().collect();

        assert_eq!(
            errors,
            vec![
                Issue::UnknownCategory {
                    event: "event_1".into(),
                    category: "sports".into()
                },
                Issue::EndBeforeStart {
                    event: "event_2".into()
                },
                Issue::MissingId { index: 3 },
            ]
        );
        assert_eq!(
            warnings,
            vec![
                Issue::UnparseableDate {
                    event: "event_3".into(),
                    field: DateField::ScheduledDate,
                    value: "tbc".into()
                },
                Issue::UnconventionalId {
                    id: "legacy-1".into()
                },
            ]
        );
    }

    #[test]
    fn required_fields_must_be_present_and_non_blank() {
        let events = vec![record(json!({
            "id": "event_1",
            "title": "   ",
            "category": "social",
            "subType": "party",
            "location": { "building": "Roundhouse" },
            "creatorId": null,
        }))];

        let report = check_events(&events);
        assert_eq!(
            report.errors().cloned().collect::<Vec<_>>(),
            vec![
                Issue::MissingField {
                    event: "event_1".into(),
                    field: "title"
                },
                Issue::MissingField {
                    event: "event_1".into(),
                    field: "creatorId"
                },
            ]
        );
        assert_eq!(
            report.issues[0].message(),
            "event_1: Missing required field \"title\""
        );
    }

    #[test]
    fn subtype_must_belong_to_its_category() {
        let events = vec![
            event(json!({ "id": "event_1", "category": "academic", "subType": "party" })),
            event(json!({ "id": "event_2", "category": "society", "subType": "workshop" })),
        ];

        let report = check_events(&events);
        assert_eq!(
            report.issues,
            vec![Issue::InvalidSubType {
                event: "event_1".into(),
                category: "academic".into(),
                sub_type: "party".into()
            }]
        );
        assert_eq!(
            report.issues[0].message(),
            "event_1: Invalid subType \"party\" for category \"academic\""
        );
    }

    #[test]
    fn privacy_level_must_be_known() {
        let events = vec![
            event(json!({ "id": "event_1", "privacyLevel": "friendsOfFriends" })),
            event(json!({ "id": "event_2", "privacyLevel": "secret" })),
        ];

        let report = check_events(&events);
        assert!(!report.is_valid());
        assert_eq!(
            report.issues,
            vec![Issue::InvalidPrivacyLevel {
                event: "event_2".into(),
                level: "secret".into()
            }]
        );
    }

    #[test]
    fn oversized_event_number_is_still_conventional() {
        let events = vec![event(json!({ "id": "event_99999999999999999999" }))];
        assert!(check_events(&events).issues.is_empty());
    }
}
