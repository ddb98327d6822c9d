//! # Calendar Reconciler
//!
//! Periodic fetch -> merge -> schedule loop. Each cycle:
//!
//! 1. fetches upcoming events (a failed fetch skips the cycle, leaving all
//!    state untouched)
//! 2. merges them into the event store
//! 3. cancels reminder tasks whose event was dropped by the merge
//! 4. schedules a reminder for every event that isn't in flight and starts
//!    before the next cycle could catch its lead time
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use super::scheduler::ReminderScheduler;
use super::store::SharedEventStore;
use crate::core::error::Result;
use crate::features::calendar::{Event, EventSource};

/// Timing policy shared by the reconciler and its reminder tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub lead_time: Duration,
    pub interval: Duration,
}

impl ReminderPolicy {
    pub fn new(lead_time: Duration, interval: Duration) -> Self {
        Self {
            lead_time,
            interval,
        }
    }

    /// How far ahead an event must be picked up in this cycle
    pub fn window(&self) -> Duration {
        self.interval.saturating_add(self.lead_time)
    }

    /// Time until `event` starts, if it falls inside this cycle's window
    pub fn due_in(&self, event: &Event, now: DateTime<Utc>) -> Option<Duration> {
        // Negative deltas (already started) fail the conversion
        let until_start = (event.start - now).to_std().ok()?;
        (!until_start.is_zero() && until_start < self.window()).then_some(until_start)
    }
}

/// Source of the reference instant, read once per cycle after the fetch returns
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Counters for one completed cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub stored: usize,
    pub cancelled: usize,
    pub scheduled: usize,
}

pub struct Reconciler {
    source: Arc<dyn EventSource>,
    store: SharedEventStore,
    scheduler: ReminderScheduler,
    policy: ReminderPolicy,
    clock: Clock,
}

impl Reconciler {
    pub fn new(
        source: Arc<dyn EventSource>,
        store: SharedEventStore,
        scheduler: ReminderScheduler,
        policy: ReminderPolicy,
    ) -> Self {
        Self {
            source,
            store,
            scheduler,
            policy,
            clock: Arc::new(Utc::now),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Run cycles forever, the first one immediately
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.policy.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Calendar reconciler started (interval: {}s, lead time: {}m)",
            self.policy.interval.as_secs(),
            self.policy.lead_time.as_secs() / 60
        );

        loop {
            interval.tick().await;

            match self.run_cycle().await {
                Ok(report) => info!(
                    "Reconciled calendar: {} fetched, {} stored, {} scheduled, {} cancelled, {} in flight",
                    report.fetched,
                    report.stored,
                    report.scheduled,
                    report.cancelled,
                    self.scheduler.in_flight_count()
                ),
                Err(e) => warn!("Error: couldn't get the upcoming events, skipping this cycle: {e}"),
            }
        }
    }

    /// One fetch-merge-schedule pass. Start offsets are measured from the
    /// moment the fetch returned, not from when it was issued.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let fetched = self.source.fetch_upcoming_events().await?;
        let now = (self.clock)();
        let mut report = CycleReport {
            fetched: fetched.len(),
            ..Default::default()
        };

        // Merge, then snapshot the merged value of each fetched identity in fetch order
        let candidates: Vec<Event> = {
            let mut store = self.store.write().await;
            store.merge(&fetched);
            report.stored = store.len();

            for identity in self.scheduler.in_flight() {
                if !store.contains(&identity) && self.scheduler.cancel(&identity) {
                    info!("{identity} was removed from the calendar, cancelling its reminder");
                    report.cancelled += 1;
                }
            }

            let mut seen = HashSet::new();
            fetched
                .iter()
                .map(Event::identity)
                .filter(|identity| seen.insert(identity.clone()))
                .filter_map(|identity| store.get(&identity).cloned())
                .collect()
        };

        for event in candidates {
            if self.scheduler.is_in_flight(&event.identity()) {
                continue;
            }
            match self.policy.due_in(&event, now) {
                Some(until_start) => {
                    if self.scheduler.schedule(event, until_start).is_some() {
                        report.scheduled += 1;
                    }
                }
                None => debug!("{} is outside this cycle's window", event.identity()),
            }
        }

        Ok(report)
    }
}
