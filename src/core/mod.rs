//! # Core Module
//!
//! Configuration, settings, error handling and Discord message helpers.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Announcer settings file and error taxonomy
//! - 1.1.0: Add response module with Discord message length utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod error;
pub mod response;
pub mod settings;

// Re-export commonly used items
pub use config::Config;
pub use error::{AnnouncerError, Result};
pub use response::{truncate_for_embed, truncate_for_message, EMBED_LIMIT, MESSAGE_LIMIT};
pub use settings::Settings;
