//! Calendar-fetch boundary.

use async_trait::async_trait;

use super::event::Event;
use crate::core::error::Result;

/// Supplies the current list of upcoming events, classified and ordered by start.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fails with [`crate::core::AnnouncerError::Fetch`] when the upstream is unavailable.
    async fn fetch_upcoming_events(&self) -> Result<Vec<Event>>;
}
