//! Platform-neutral rich content attached to announcements.

use chrono::{DateTime, Utc};
use log::warn;

use crate::core::response::truncate_for_embed;
use crate::core::settings::ReferenceZone;
use crate::features::calendar::Event;

pub const CARD_COLOR: u32 = 0xf570ff;
pub const NO_DESCRIPTION: &str = "*No description available*";
pub const UTC_FIELD: &str = "Start time in GMT/UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<CardField>,
    pub footer: Option<String>,
}

impl EventCard {
    /// Card without start times or footer, used once the event begins
    pub fn brief(event: &Event) -> Self {
        Self {
            title: event.subject.clone(),
            description: truncate_for_embed(event.description.as_deref().unwrap_or(NO_DESCRIPTION)),
            color: CARD_COLOR,
            fields: Vec::new(),
            footer: None,
        }
    }

    /// Card with the start time in UTC and each reference zone, plus the footer
    pub fn detailed(event: &Event, zones: &[ReferenceZone], footer: &str) -> Self {
        let mut card = Self::brief(event);
        card.fields = start_time_fields(event.start, zones);
        card.footer = Some(footer.to_string());
        card
    }
}

fn start_time_fields(start: DateTime<Utc>, zones: &[ReferenceZone]) -> Vec<CardField> {
    let mut fields = vec![CardField {
        name: UTC_FIELD.to_string(),
        value: start.format("%H:%M").to_string(),
        inline: false,
    }];

    for zone in zones {
        match zone.tz() {
            Ok(tz) => fields.push(CardField {
                name: zone.label.clone(),
                value: start.with_timezone(&tz).format("%H:%M").to_string(),
                inline: true,
            }),
            Err(e) => warn!("Skipping reference zone {}: {e}", zone.label),
        }
    }

    fields
}
