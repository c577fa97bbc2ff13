/// Events file rewritten by every job
pub const DEFAULT_EVENTS_FILE: &str = "assets/demo_data/events.json";

/// Backup written by the date shifter before mutating the events file
pub const DEFAULT_SHIFT_BACKUP_FILE: &str = "assets/demo_data/events_backup_pre_transform.json";

/// Backup written by the week duplicator before mutating the events file
pub const DEFAULT_DUPLICATE_BACKUP_FILE: &str =
    "assets/demo_data/events_backup_before_week_duplication.json";

/// Days added by the date shifter. A multiple of 7 keeps weekdays intact.
pub const DEFAULT_SHIFT_DAYS: i64 = 28;

/// Days subtracted from each duplicated event (Oct 13 -> Oct 5)
pub const DEFAULT_DUPLICATE_DAYS: i64 = 8;

pub const DEFAULT_DUPLICATE_CATEGORY: &str = "academic";
pub const DEFAULT_DUPLICATE_FROM: &str = "2025-10-13";
pub const DEFAULT_DUPLICATE_TO: &str = "2025-10-19";

/// Prefix of conventional event ids (`event_<N>`)
pub const EVENT_ID_PREFIX: &str = "event_";

/// Categories accepted by the integrity check
pub const KNOWN_CATEGORIES: &[&str] = &["academic", "social", "society", "personal", "university"];

/// Fields every event must carry with a non-blank value
pub const REQUIRED_EVENT_FIELDS: &[&str] = &["title", "category", "subType", "location", "creatorId"];

/// Accepted `subType` values per category
pub const CATEGORY_SUBTYPES: &[(&str, &[&str])] = &[
    (
        "academic",
        &["lecture", "tutorial", "workshop", "seminar", "exam", "assignment", "project"],
    ),
    ("social", &["party", "meetup", "dinner", "game", "outing", "celebration"]),
    ("society", &["meeting", "event", "competition", "social", "workshop"]),
    ("personal", &["study", "appointment", "reminder", "deadline"]),
    ("university", &["orientation", "graduation", "ceremony", "announcement"]),
];

pub const PRIVACY_LEVELS: &[&str] = &[
    "public",
    "university",
    "faculty",
    "friends",
    "friendsOfFriends",
    "inviteOnly",
    "organizersOnly",
    "private",
];
