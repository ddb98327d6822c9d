// Core layer - shared types and configuration
pub mod core;

// Features layer - calendar, notifications and reminders
pub mod features;

#[cfg(test)]
mod test_utils;

pub use core::{AnnouncerError, Config, Settings};
pub use features::{Announcer, EventStore, Reconciler, ReminderScheduler};
