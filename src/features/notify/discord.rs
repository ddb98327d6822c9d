//! # Discord Delivery
//!
//! Posts announcements to Discord text channels through serenity's HTTP
//! client. Channel names are resolved through the configured directory.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

use super::card::EventCard;
use super::channels::{ChannelDirectory, ChannelKey};
use super::sink::NotificationSink;
use crate::core::embeds::event_embed;
use crate::core::error::{AnnouncerError, Result};
use crate::core::response::truncate_for_message;

pub struct DiscordSink {
    http: Arc<Http>,
    directory: ChannelDirectory,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, directory: ChannelDirectory) -> Self {
        Self { http, directory }
    }
}

#[async_trait]
impl NotificationSink for DiscordSink {
    async fn send(&self, channel: &ChannelKey, text: &str, card: Option<&EventCard>) -> Result<()> {
        let channel_id = ChannelId(self.directory.resolve(channel)?);
        let content = truncate_for_message(text);
        let embed = card.map(event_embed);

        channel_id
            .send_message(&*self.http, |m| {
                m.content(&content);
                if let Some(embed) = embed {
                    m.set_embed(embed);
                }
                m
            })
            .await
            .map_err(|e| AnnouncerError::dispatch(channel.name(), e))?;

        debug!("Sent to #{channel} ({})", channel_id.0);
        Ok(())
    }
}
