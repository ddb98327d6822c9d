//! Reminder scheduler: claims an event's identity and spawns its task.

use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::registry::InFlightRegistry;
use super::store::SharedEventStore;
use super::task::{ReminderTask, TaskOutcome};
use crate::features::calendar::{Event, EventIdentity};
use crate::features::notify::Announcer;

#[derive(Clone)]
pub struct ReminderScheduler {
    registry: Arc<InFlightRegistry>,
    store: SharedEventStore,
    announcer: Arc<Announcer>,
    lead_time: Duration,
}

impl ReminderScheduler {
    pub fn new(store: SharedEventStore, announcer: Arc<Announcer>, lead_time: Duration) -> Self {
        Self {
            registry: InFlightRegistry::new(),
            store,
            announcer,
            lead_time,
        }
    }

    /// Spawn a reminder task for `event`, starting in `until_start`.
    ///
    /// Returns `None` without spawning when the identity already has a task.
    /// The task runs detached; the handle is only useful to callers that want
    /// to observe its outcome.
    pub fn schedule(&self, event: Event, until_start: Duration) -> Option<JoinHandle<TaskOutcome>> {
        let identity = event.identity();
        let Some(guard) = self.registry.try_claim(identity.clone()) else {
            warn!("Reminder for {identity} is already in flight, not scheduling another");
            return None;
        };

        info!(
            "Sending reminders for: {identity} (starts in {}m)",
            until_start.as_secs() / 60
        );
        let task = ReminderTask::new(
            event,
            until_start,
            self.lead_time,
            self.store.clone(),
            self.announcer.clone(),
            guard,
        );
        Some(tokio::spawn(task.run()))
    }

    pub fn is_in_flight(&self, identity: &EventIdentity) -> bool {
        self.registry.contains(identity)
    }

    pub fn in_flight_count(&self) -> usize {
        self.registry.len()
    }

    pub fn in_flight(&self) -> Vec<EventIdentity> {
        self.registry.identities()
    }

    pub fn cancel(&self, identity: &EventIdentity) -> bool {
        self.registry.cancel(identity)
    }
}
