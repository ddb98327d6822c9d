//! # Feature: Event Announcements
//!
//! Builds the two announcements every event gets and routes them to the
//! named channels:
//!
//! - **Lead**: `general` and the event's committee channel get the detailed
//!   card; `telegram-bridge` gets plain text.
//! - **Start**: `general` and `events` get the brief card; `telegram-bridge`
//!   gets plain text.
//!
//! Each send is independent. A missing channel or a failed send is logged and
//! the remaining sends still go out.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::card::EventCard;
use super::channels::ChannelKey;
use super::sink::NotificationSink;
use crate::core::error::AnnouncerError;
use crate::core::settings::{ReferenceZone, Settings};
use crate::features::calendar::{Event, DEFAULT_CLASSIFICATION};

/// Outcome of one announcement across all its channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DeliveryReport {
    fn record(&mut self, channel: &ChannelKey, outcome: Result<(), AnnouncerError>) {
        match outcome {
            Ok(()) => self.delivered += 1,
            Err(e @ AnnouncerError::ChannelResolution(_)) => {
                warn!("Skipping send to #{channel}: {e}");
                self.skipped += 1;
            }
            Err(e) => {
                error!("Failed to send to #{channel}: {e}");
                self.failed += 1;
            }
        }
    }
}

pub struct Announcer {
    sink: Arc<dyn NotificationSink>,
    lead_minutes: u64,
    zones: Vec<ReferenceZone>,
    footer: String,
}

impl Announcer {
    pub fn new(sink: Arc<dyn NotificationSink>, lead_time: Duration, settings: &Settings) -> Self {
        Self {
            sink,
            lead_minutes: lead_time.as_secs() / 60,
            zones: settings.reference_zones.clone(),
            footer: settings.footer.clone(),
        }
    }

    pub async fn announce_lead(&self, event: &Event) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let card = EventCard::detailed(event, &self.zones, &self.footer);
        let text = format!("{} starts in {} minutes!", event.subject, self.lead_minutes);
        let bridge_text = format!(
            "{} starts in {} minutes in the Discord meeting room!",
            event.subject, self.lead_minutes
        );

        self.deliver(&mut report, ChannelKey::General, &text, Some(&card))
            .await;
        self.deliver(&mut report, ChannelKey::Bridge, &bridge_text, None)
            .await;
        if let Some(committee) = committee_channel(event) {
            self.deliver(&mut report, committee, &text, Some(&card)).await;
        }

        info!(
            "Lead announcement for '{}': {} delivered, {} skipped, {} failed",
            event.subject, report.delivered, report.skipped, report.failed
        );
        report
    }

    pub async fn announce_start(&self, event: &Event) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let card = EventCard::brief(event);
        let text = format!("{} starts now!", event.subject);
        let bridge_text = format!("{} starts now in the Discord meeting room!", event.subject);

        self.deliver(&mut report, ChannelKey::General, &text, Some(&card))
            .await;
        self.deliver(&mut report, ChannelKey::Events, &text, Some(&card))
            .await;
        self.deliver(&mut report, ChannelKey::Bridge, &bridge_text, None)
            .await;

        info!(
            "Start announcement for '{}': {} delivered, {} skipped, {} failed",
            event.subject, report.delivered, report.skipped, report.failed
        );
        report
    }

    async fn deliver(
        &self,
        report: &mut DeliveryReport,
        channel: ChannelKey,
        text: &str,
        card: Option<&EventCard>,
    ) {
        let outcome = self.sink.send(&channel, text, card).await;
        report.record(&channel, outcome);
    }
}

/// Committee channel for the event's classification, if it has one of its own
fn committee_channel(event: &Event) -> Option<ChannelKey> {
    let label = event.classification.as_str();
    let fixed = [
        ChannelKey::General.name(),
        ChannelKey::Events.name(),
        ChannelKey::Bridge.name(),
    ];
    if label == DEFAULT_CLASSIFICATION || fixed.contains(&label) {
        None
    } else {
        Some(ChannelKey::Committee(label.to_string()))
    }
}
