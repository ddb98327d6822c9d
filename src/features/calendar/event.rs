//! Calendar event model and its derived identity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification used when no rule matches the subject
pub const DEFAULT_CLASSIFICATION: &str = "Other";

/// One calendar occurrence, normalised to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub subject: String,
    pub description: Option<String>,
    pub classification: String,
}

impl Event {
    pub fn identity(&self) -> EventIdentity {
        EventIdentity::new(self.start, &self.subject)
    }
}

/// Derived lookup key: start time + subject.
///
/// Two events sharing both fields are treated as the same event. There is no
/// stable upstream id to fall back on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventIdentity {
    start: DateTime<Utc>,
    subject: String,
}

impl EventIdentity {
    pub fn new(start: DateTime<Utc>, subject: &str) -> Self {
        Self {
            start,
            subject: subject.to_string(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}",
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.subject
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(subject: &str, description: Option<&str>) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 17, 0, 0).unwrap();
        Event {
            start,
            end: start + chrono::Duration::hours(1),
            subject: subject.to_string(),
            description: description.map(str::to_string),
            classification: DEFAULT_CLASSIFICATION.to_string(),
        }
    }

    #[test]
    fn test_identity_ignores_description() {
        let a = event("Design Weekly", Some("agenda"));
        let b = event("Design Weekly", None);
        assert_ne!(a, b);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_identity_differs_by_subject() {
        assert_ne!(
            event("Design Weekly", None).identity(),
            event("Governance Weekly", None).identity()
        );
    }

    #[test]
    fn test_identity_display() {
        let id = event("Design Weekly", None).identity();
        assert_eq!(id.to_string(), "2024-03-05T17:00:00Z_Design Weekly");
    }
}
