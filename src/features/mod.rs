//! # Features Layer
//!
//! - **calendar**: event model, classification and the Google Calendar source
//! - **notify**: announcement cards and channel delivery
//! - **reminders**: reconciliation loop and reminder tasks

pub mod calendar;
pub mod notify;
pub mod reminders;

pub use calendar::{Classifier, Event, EventIdentity, EventSource, GoogleCalendarSource};
pub use notify::{Announcer, ChannelDirectory, DiscordSink, NotificationSink};
pub use reminders::{EventStore, Reconciler, ReminderPolicy, ReminderScheduler};

/// Version reported in the startup log
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
