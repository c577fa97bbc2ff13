//! The events file: load, back up and save.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{DemoDataError, DemoDataResult};
use crate::event::EventRecord;

const EVENTS_KEY: &str = "events";
const COMMENT_KEY: &str = "_comment";

/// Top-level document of the events file.
///
/// Top-level keys other than `events` are kept as-is. The `events` key keeps
/// its position in the object so a rewrite only changes what was transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsDocument {
    fields: Map<String, Value>,
    pub events: Vec<EventRecord>,
}

impl EventsDocument {
    pub fn new(events: Vec<EventRecord>) -> Self {
        let mut fields = Map::new();
        fields.insert(EVENTS_KEY.to_string(), Value::Null);
        EventsDocument { fields, events }
    }

    /// Load the events file. A missing file is reported as
    /// [`DemoDataError::EventsFileNotFound`].
    pub fn load(path: &Path) -> DemoDataResult<Self> {
        if !path.exists() {
            return Err(DemoDataError::EventsFileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let doc = Self::from_json(&content)?;
        log::debug!("Loaded {} events from {}", doc.events.len(), path.display());
        Ok(doc)
    }

    pub fn from_json(content: &str) -> DemoDataResult<Self> {
        let root: Value = serde_json::from_str(content)?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> DemoDataResult<Self> {
        let Value::Object(mut fields) = root else {
            return Err(DemoDataError::InvalidDocument(
                "top-level value must be an object".into(),
            ));
        };

        let events = match fields.get_mut(EVENTS_KEY).map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(map) => Ok(EventRecord::new(map)),
                    _ => Err(DemoDataError::InvalidDocument(format!(
                        "events[{}] is not an object",
                        idx
                    ))),
                })
                .collect::<DemoDataResult<Vec<_>>>()?,
            Some(_) => {
                return Err(DemoDataError::InvalidDocument(
                    "\"events\" must be an array".into(),
                ));
            }
        };

        if !fields.contains_key(EVENTS_KEY) {
            fields.insert(EVENTS_KEY.to_string(), Value::Null);
        }

        Ok(EventsDocument { fields, events })
    }

    pub fn to_value(&self) -> DemoDataResult<Value> {
        let mut fields = self.fields.clone();
        let events = serde_json::to_value(&self.events)?;
        if let Some(slot) = fields.get_mut(EVENTS_KEY) {
            *slot = events;
        }
        Ok(Value::Object(fields))
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> DemoDataResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }

    pub fn comment(&self) -> Option<&str> {
        self.fields.get(COMMENT_KEY).and_then(Value::as_str)
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.fields
            .insert(COMMENT_KEY.to_string(), Value::String(comment.into()));
    }

    /// Append a sentence to `_comment`, creating it if absent.
    pub fn annotate_comment(&mut self, note: &str) {
        let comment = match self.comment() {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim_end(), note)
            }
            _ => note.to_string(),
        };
        self.set_comment(comment);
    }

    /// Write the document to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> DemoDataResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_json()?)?;
        log::debug!("Wrote {} events to {}", self.events.len(), path.display());
        Ok(())
    }
}
