//! # Reminders Feature
//!
//! Event store reconciliation and two-phase reminder scheduling, with at most
//! one in-flight reminder per event identity.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Calendar-driven reminders replace user-requested ones

pub mod reconciler;
pub mod registry;
pub mod scheduler;
pub mod store;
pub mod task;

pub use reconciler::{CycleReport, Reconciler, ReminderPolicy};
pub use registry::{InFlightGuard, InFlightRegistry};
pub use scheduler::ReminderScheduler;
pub use store::{EventStore, SharedEventStore};
pub use task::{ReminderPhase, ReminderTask, TaskOutcome};
