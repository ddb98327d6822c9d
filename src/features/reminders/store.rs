//! Event store: the current known events keyed by identity.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::features::calendar::{Event, EventIdentity};

/// Store shared between the reconciler (sole writer) and reminder tasks (readers)
pub type SharedEventStore = Arc<RwLock<EventStore>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: HashMap<EventIdentity, Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedEventStore {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Merge a freshly fetched event list.
    ///
    /// Every fetched event is upserted under its identity, then any stored
    /// event that doesn't equal one of the fetched events is dropped. An empty
    /// fetch clears the store.
    pub fn merge(&mut self, fetched: &[Event]) {
        for event in fetched {
            self.events.insert(event.identity(), event.clone());
        }
        self.events.retain(|_, stored| fetched.contains(stored));
    }

    pub fn get(&self, identity: &EventIdentity) -> Option<&Event> {
        self.events.get(identity)
    }

    pub fn contains(&self, identity: &EventIdentity) -> bool {
        self.events.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
