//! Shared test doubles for the calendar and notification seams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::core::error::{AnnouncerError, Result};
use crate::features::calendar::{Event, EventSource};
use crate::features::notify::{ChannelKey, EventCard, NotificationSink};

pub fn sample_event(subject: &str, start: DateTime<Utc>, classification: &str) -> Event {
    Event {
        start,
        end: start + chrono::Duration::hours(1),
        subject: subject.to_string(),
        description: None,
        classification: classification.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: String,
    pub text: String,
    pub card: Option<EventCard>,
}

/// Sink that records deliveries to a fixed set of known channels
#[derive(Debug, Default)]
pub struct RecordingSink {
    channels: HashSet<String>,
    failing: HashSet<String>,
    fail_all: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingSink {
    pub fn with_channels(channels: &[&str]) -> Self {
        Self {
            channels: channels.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, channel: &str) -> Self {
        self.failing.insert(channel.to_string());
        self
    }

    pub fn failing_on_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel: &str) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.channel == channel)
            .collect()
    }

    /// Sends attempted, including unknown and failing channels
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, channel: &ChannelKey, text: &str, card: Option<&EventCard>) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let name = channel.name();

        if !self.channels.contains(name) {
            return Err(AnnouncerError::ChannelResolution(name.to_string()));
        }
        if self.fail_all || self.failing.contains(name) {
            return Err(AnnouncerError::dispatch(name, "simulated outage"));
        }

        self.sent.lock().unwrap().push(SentMessage {
            channel: name.to_string(),
            text: text.to_string(),
            card: card.cloned(),
        });
        Ok(())
    }
}

/// Source returning whatever the test last scripted
#[derive(Debug, Default)]
pub struct ScriptedSource {
    events: Mutex<Vec<Event>>,
    failure: Mutex<Option<String>>,
    latency: Mutex<Duration>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn set_events(&self, events: Vec<Event>) {
        *self.events.lock().unwrap() = events;
        *self.failure.lock().unwrap() = None;
    }

    pub fn set_failure(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Delay every fetch by `latency` on the tokio clock
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn fetch_upcoming_events(&self) -> Result<Vec<Event>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(AnnouncerError::fetch(reason));
        }
        Ok(self.events.lock().unwrap().clone())
    }
}
