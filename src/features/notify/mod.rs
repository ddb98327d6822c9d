//! # Notification Feature
//!
//! Announcement building, channel routing and Discord delivery.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod announcer;
pub mod card;
pub mod channels;
pub mod discord;
pub mod sink;

pub use announcer::{Announcer, DeliveryReport};
pub use card::EventCard;
pub use channels::{ChannelDirectory, ChannelKey};
pub use discord::DiscordSink;
pub use sink::NotificationSink;
