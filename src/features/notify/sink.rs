//! Notification-delivery boundary.

use async_trait::async_trait;

use super::card::EventCard;
use super::channels::ChannelKey;
use crate::core::error::Result;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message to a named channel.
    ///
    /// Returns [`crate::core::AnnouncerError::ChannelResolution`] when the
    /// channel isn't configured and [`crate::core::AnnouncerError::Dispatch`]
    /// when delivery itself fails.
    async fn send(&self, channel: &ChannelKey, text: &str, card: Option<&EventCard>) -> Result<()>;
}
