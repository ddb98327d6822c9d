//! # Calendar Feature
//!
//! Event model, subject classification and the calendar-fetch boundary.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod classify;
pub mod description;
pub mod event;
pub mod google;
pub mod source;

pub use classify::{ClassificationRule, Classifier};
pub use description::clean_description;
pub use event::{Event, EventIdentity, DEFAULT_CLASSIFICATION};
pub use google::GoogleCalendarSource;
pub use source::EventSource;
