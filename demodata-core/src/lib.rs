//! Core of the demodata tools.
//!
//! This crate owns the events file and the transforms run over it:
//! - `document` / `event` for the open-schema JSON records
//! - `shift` moves every event's dates by a fixed number of days
//! - `duplicate` copies a week of events into an earlier window
//! - `check` reports integrity problems without writing anything

pub mod check;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod datetime;
pub mod document;
pub mod duplicate;
pub mod error;
pub mod event;
pub mod shift;

pub use document::EventsDocument;
pub use error::{DemoDataError, DemoDataResult};
pub use event::{DateField, EventRecord};
