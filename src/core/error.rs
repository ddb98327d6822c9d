//! Error taxonomy for the announcer.
//!
//! Every variant is recoverable: fetch failures skip a reconciliation cycle,
//! channel and dispatch failures skip a single send.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnnouncerError>;

#[derive(Error, Debug)]
pub enum AnnouncerError {
    #[error("Couldn't fetch upcoming events: {0}")]
    Fetch(String),

    #[error("No channel configured for '{0}'")]
    ChannelResolution(String),

    #[error("Failed to deliver to '{channel}': {reason}")]
    Dispatch { channel: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnnouncerError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn dispatch(channel: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Dispatch {
            channel: channel.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnnouncerError::fetch("timeout");
        assert!(err.to_string().contains("timeout"));

        let err = AnnouncerError::ChannelResolution("Design".into());
        assert_eq!(err.to_string(), "No channel configured for 'Design'");
    }

    #[test]
    fn test_config_constructor() {
        let err = AnnouncerError::config("no TLS backend");
        assert!(matches!(&err, AnnouncerError::Config(msg) if msg == "no TLS backend"));
        assert_eq!(err.to_string(), "Configuration error: no TLS backend");
    }

    #[test]
    fn test_dispatch_constructor() {
        let err = AnnouncerError::dispatch("general", "HTTP 500");
        match err {
            AnnouncerError::Dispatch { channel, reason } => {
                assert_eq!(channel, "general");
                assert_eq!(reason, "HTTP 500");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
