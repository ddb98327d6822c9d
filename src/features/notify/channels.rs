//! Named notification channels and the name -> Discord channel directory.

use std::collections::HashMap;
use std::fmt;

use crate::core::error::{AnnouncerError, Result};

pub const GENERAL_CHANNEL: &str = "general";
pub const EVENTS_CHANNEL: &str = "events";
pub const BRIDGE_CHANNEL: &str = "telegram-bridge";

/// A destination by name, independent of the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelKey {
    General,
    Events,
    /// Relays to the Telegram group; gets plain text only
    Bridge,
    /// Per-classification committee channel, named after the label
    Committee(String),
}

impl ChannelKey {
    pub fn name(&self) -> &str {
        match self {
            ChannelKey::General => GENERAL_CHANNEL,
            ChannelKey::Events => EVENTS_CHANNEL,
            ChannelKey::Bridge => BRIDGE_CHANNEL,
            ChannelKey::Committee(label) => label,
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel name -> platform channel id
#[derive(Debug, Clone, Default)]
pub struct ChannelDirectory {
    ids: HashMap<String, u64>,
}

impl ChannelDirectory {
    pub fn new(ids: HashMap<String, u64>) -> Self {
        Self { ids }
    }

    pub fn resolve(&self, key: &ChannelKey) -> Result<u64> {
        self.ids
            .get(key.name())
            .copied()
            .ok_or_else(|| AnnouncerError::ChannelResolution(key.name().to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
