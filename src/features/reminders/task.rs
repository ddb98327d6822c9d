//! # Reminder Task
//!
//! One task per event occurrence, a two-phase timer:
//!
//! ```text
//! WaitingLead -> NotifiedLead -> WaitingStart -> NotifiedStart -> Done
//! ```
//!
//! Events discovered inside their own lead window skip straight to
//! `WaitingStart` and only get the start announcement. Before announcing the
//! start the task re-reads the event store and stays quiet if the event has
//! been dropped upstream. The task also stops as soon as its cancellation
//! token fires.
//!
//! The in-flight guard is owned by the task, so the identity is released on
//! every exit path.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::registry::InFlightGuard;
use super::store::SharedEventStore;
use crate::features::calendar::Event;
use crate::features::notify::Announcer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPhase {
    WaitingLead,
    NotifiedLead,
    WaitingStart,
    NotifiedStart,
    Done,
}

impl std::fmt::Display for ReminderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderPhase::WaitingLead => write!(f, "waiting_lead"),
            ReminderPhase::NotifiedLead => write!(f, "notified_lead"),
            ReminderPhase::WaitingStart => write!(f, "waiting_start"),
            ReminderPhase::NotifiedStart => write!(f, "notified_start"),
            ReminderPhase::Done => write!(f, "done"),
        }
    }
}

/// What a finished task did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Every phase the task entered, in order
    pub phases: Vec<ReminderPhase>,
    pub cancelled: bool,
}

impl TaskOutcome {
    pub fn lead_announced(&self) -> bool {
        self.phases.contains(&ReminderPhase::NotifiedLead)
    }

    pub fn start_announced(&self) -> bool {
        self.phases.contains(&ReminderPhase::NotifiedStart)
    }
}

pub struct ReminderTask {
    event: Event,
    until_start: Duration,
    lead_time: Duration,
    store: SharedEventStore,
    announcer: Arc<Announcer>,
    guard: InFlightGuard,
    phases: Vec<ReminderPhase>,
}

impl ReminderTask {
    pub fn new(
        event: Event,
        until_start: Duration,
        lead_time: Duration,
        store: SharedEventStore,
        announcer: Arc<Announcer>,
        guard: InFlightGuard,
    ) -> Self {
        Self {
            event,
            until_start,
            lead_time,
            store,
            announcer,
            guard,
            phases: vec![ReminderPhase::WaitingLead],
        }
    }

    pub async fn run(mut self) -> TaskOutcome {
        let token = self.guard.token().clone();

        let cancelled = tokio::select! {
            biased;
            _ = token.cancelled() => true,
            _ = self.drive() => false,
        };

        if cancelled {
            info!(
                "Reminder for {} cancelled in phase {}",
                self.guard.identity(),
                self.phase()
            );
        }
        self.enter(ReminderPhase::Done);

        TaskOutcome {
            phases: std::mem::take(&mut self.phases),
            cancelled,
        }
        // guard drops with self, releasing the identity
    }

    async fn drive(&mut self) {
        if self.until_start > self.lead_time {
            sleep(self.until_start - self.lead_time).await;

            let event = self.latest_event().await;
            self.announcer.announce_lead(&event).await;
            self.enter(ReminderPhase::NotifiedLead);

            self.enter(ReminderPhase::WaitingStart);
            sleep(self.lead_time).await;
        } else {
            debug!(
                "{} is already inside its lead window, waiting for start only",
                self.guard.identity()
            );
            self.enter(ReminderPhase::WaitingStart);
            sleep(self.until_start).await;
        }

        // The event may have been dropped upstream while we slept
        let current = self.store.read().await.get(self.guard.identity()).cloned();
        match current {
            Some(event) => {
                self.announcer.announce_start(&event).await;
                self.enter(ReminderPhase::NotifiedStart);
            }
            None => info!(
                "{} is no longer on the calendar, skipping start announcement",
                self.guard.identity()
            ),
        }
    }

    /// Freshest stored copy of the event, or the snapshot taken at scheduling time
    async fn latest_event(&self) -> Event {
        self.store
            .read()
            .await
            .get(self.guard.identity())
            .cloned()
            .unwrap_or_else(|| self.event.clone())
    }

    fn phase(&self) -> ReminderPhase {
        self.phases
            .last()
            .copied()
            .unwrap_or(ReminderPhase::WaitingLead)
    }

    fn enter(&mut self, phase: ReminderPhase) {
        debug!("{}: {} -> {}", self.guard.identity(), self.phase(), phase);
        self.phases.push(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Settings;
    use crate::features::reminders::registry::InFlightRegistry;
    use crate::features::reminders::store::EventStore;
    use crate::test_utils::{sample_event, RecordingSink};
    use chrono::Utc;

    const LEAD: Duration = Duration::from_secs(2700);

    struct Fixture {
        store: SharedEventStore,
        registry: Arc<InFlightRegistry>,
        sink: Arc<RecordingSink>,
        announcer: Arc<Announcer>,
    }

    fn fixture(sink: RecordingSink) -> Fixture {
        let sink = Arc::new(sink);
        Fixture {
            store: EventStore::shared(),
            registry: InFlightRegistry::new(),
            announcer: Arc::new(Announcer::new(sink.clone(), LEAD, &Settings::default())),
            sink,
        }
    }

    fn all_channels() -> RecordingSink {
        RecordingSink::with_channels(&["general", "events", "telegram-bridge", "Design"])
    }

    impl Fixture {
        async fn task(&self, event: &Event, until_start: Duration) -> ReminderTask {
            self.store.write().await.merge(std::slice::from_ref(event));
            let guard = self.registry.try_claim(event.identity()).unwrap();
            ReminderTask::new(
                event.clone(),
                until_start,
                LEAD,
                self.store.clone(),
                self.announcer.clone(),
                guard,
            )
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_two_phase_run() {
        let fx = fixture(all_channels());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(3000)).await;

        let outcome = task.run().await;

        assert_eq!(
            outcome.phases,
            vec![
                ReminderPhase::WaitingLead,
                ReminderPhase::NotifiedLead,
                ReminderPhase::WaitingStart,
                ReminderPhase::NotifiedStart,
                ReminderPhase::Done,
            ]
        );
        assert!(!outcome.cancelled);
        assert_eq!(fx.sink.sent_to("general").len(), 2);
        assert!(fx.registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortened_lead_sends_single_announcement() {
        let fx = fixture(all_channels());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(1000)).await;
        let handle = tokio::spawn(task.run());

        sleep(Duration::from_secs(999)).await;
        assert!(fx.sink.sent().is_empty());

        sleep(Duration::from_secs(2)).await;
        let general = fx.sink.sent_to("general");
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].text, "Design Weekly starts now!");

        let outcome = handle.await.unwrap();
        assert!(!outcome.lead_announced());
        assert!(outcome.start_announced());
        assert_eq!(
            outcome.phases,
            vec![
                ReminderPhase::WaitingLead,
                ReminderPhase::WaitingStart,
                ReminderPhase::NotifiedStart,
                ReminderPhase::Done,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_after_dispatch_failure() {
        let fx = fixture(all_channels().failing_on_all());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(3000)).await;
        assert!(fx.registry.contains(&event.identity()));

        let outcome = task.run().await;

        // Failed deliveries don't abort the state machine
        assert!(outcome.start_announced());
        assert!(fx.sink.sent().is_empty());
        assert!(fx.sink.attempts() > 0);
        assert!(!fx.registry.contains(&event.identity()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_suppressed_when_event_dropped_from_store() {
        let fx = fixture(all_channels());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(3000)).await;
        let handle = tokio::spawn(task.run());

        // Lead fires at 300s
        sleep(Duration::from_secs(301)).await;
        assert_eq!(fx.sink.sent_to("general").len(), 1);

        // Upstream cancellation: the next fetch no longer contains the event
        fx.store.write().await.merge(&[]);

        let outcome = handle.await.unwrap();
        assert!(outcome.lead_announced());
        assert!(!outcome.start_announced());
        assert!(!outcome.cancelled);
        assert_eq!(fx.sink.sent_to("general").len(), 1);
        assert!(fx.sink.sent_to("events").is_empty());
        assert!(!fx.registry.contains(&event.identity()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_task_before_lead() {
        let fx = fixture(all_channels());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(3000)).await;
        let handle = tokio::spawn(task.run());

        sleep(Duration::from_secs(100)).await;
        assert!(fx.registry.cancel(&event.identity()));

        let outcome = handle.await.unwrap();
        assert!(outcome.cancelled);
        assert_eq!(
            outcome.phases,
            vec![ReminderPhase::WaitingLead, ReminderPhase::Done]
        );
        assert!(fx.sink.sent().is_empty());
        assert!(fx.registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lead_uses_refreshed_description() {
        let fx = fixture(all_channels());
        let event = sample_event("Design Weekly", Utc::now(), "Design");
        let task = fx.task(&event, Duration::from_secs(3000)).await;
        let handle = tokio::spawn(task.run());

        let mut updated = event.clone();
        updated.description = Some("Updated agenda".to_string());
        fx.store.write().await.merge(&[updated]);

        sleep(Duration::from_secs(301)).await;
        let general = fx.sink.sent_to("general");
        assert_eq!(
            general[0].card.as_ref().map(|c| c.description.as_str()),
            Some("Updated agenda")
        );
        handle.abort();
    }
}
