//! # Google Calendar Source
//!
//! Reads upcoming events from a public Google calendar through the v3 REST
//! API using an API key.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;

use super::classify::Classifier;
use super::description::clean_description;
use super::event::Event;
use super::source::EventSource;
use crate::core::error::{AnnouncerError, Result};

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    summary: Option<String>,
    description: Option<String>,
    visibility: Option<String>,
    start: Option<GoogleEventTime>,
    end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    /// RFC 3339 with offset; absent for all-day events
    date_time: Option<String>,
}

pub struct GoogleCalendarSource {
    client: reqwest::Client,
    api_base: String,
    timeout: Duration,
    calendar_id: String,
    api_key: String,
    max_results: u32,
    classifier: Classifier,
}

impl GoogleCalendarSource {
    /// Build a source whose requests give up after `timeout`, so a hung
    /// upstream fails one cycle instead of stalling the reconciler.
    pub fn new(
        calendar_id: &str,
        api_key: &str,
        max_results: u32,
        timeout: Duration,
        classifier: Classifier,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnnouncerError::config(format!("Couldn't build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: API_BASE.to_string(),
            timeout,
            calendar_id: calendar_id.to_string(),
            api_key: api_key.to_string(),
            max_results,
            classifier,
        })
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }

    /// Calendar ids carry `@` and sometimes `#`, so they go in as one encoded segment
    fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(&self.calendar_id)
        )
    }

    /// Convert a raw events page into announcer events, dropping entries that can't be announced
    fn convert_page(&self, page: EventsPage) -> Vec<Event> {
        page.items
            .into_iter()
            .filter_map(|raw| self.convert_event(raw))
            .collect()
    }

    fn convert_event(&self, raw: GoogleEvent) -> Option<Event> {
        // Summary is hidden for private events
        let subject = raw.summary.filter(|s| !s.trim().is_empty())?;
        if raw.visibility.as_deref() == Some("private") {
            debug!("Skipping private event '{subject}'");
            return None;
        }

        let start = raw.start.and_then(|t| t.date_time).and_then(|s| parse_utc(&s));
        let end = raw.end.and_then(|t| t.date_time).and_then(|s| parse_utc(&s));
        let (Some(start), Some(end)) = (start, end) else {
            debug!("Skipping event '{subject}' without a timed start/end");
            return None;
        };

        Some(Event {
            start,
            end,
            classification: self.classifier.classify(&subject),
            description: raw.description.as_deref().and_then(clean_description),
            subject,
        })
    }
}

fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl EventSource for GoogleCalendarSource {
    async fn fetch_upcoming_events(&self) -> Result<Vec<Event>> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = self.max_results.to_string();

        let response = self
            .client
            .get(self.events_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("timeMin", now.as_str()),
                ("maxResults", max_results.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnnouncerError::fetch(format!(
                        "Calendar request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    AnnouncerError::fetch(format!("Calendar request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AnnouncerError::fetch(format!("Calendar API {status}: {text}")));
        }

        let page: EventsPage = response
            .json()
            .await
            .map_err(|e| AnnouncerError::fetch(format!("Invalid calendar response: {e}")))?;

        let events = self.convert_page(page);
        if events.is_empty() {
            info!("No upcoming events found.");
        }
        Ok(events)
    }
}
