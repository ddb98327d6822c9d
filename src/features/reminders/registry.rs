//! In-flight registry: identities currently owned by a running reminder task.
//!
//! Claiming an identity hands out an [`InFlightGuard`]; dropping the guard
//! releases the identity, so every exit path of a task (completion, failed
//! delivery, cancellation, panic) frees its slot.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::features::calendar::EventIdentity;

#[derive(Debug, Default)]
pub struct InFlightRegistry {
    tasks: DashMap<EventIdentity, CancellationToken>,
}

impl InFlightRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim an identity for a new task. Returns `None` if another task already holds it.
    pub fn try_claim(self: &Arc<Self>, identity: EventIdentity) -> Option<InFlightGuard> {
        match self.tasks.entry(identity.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let token = CancellationToken::new();
                slot.insert(token.clone());
                Some(InFlightGuard {
                    registry: Arc::clone(self),
                    identity,
                    token,
                })
            }
        }
    }

    /// Signal the task holding `identity` to stop. Returns whether a task was found.
    pub fn cancel(&self, identity: &EventIdentity) -> bool {
        match self.tasks.get(identity) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, identity: &EventIdentity) -> bool {
        self.tasks.contains_key(identity)
    }

    pub fn identities(&self) -> Vec<EventIdentity> {
        self.tasks.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Ownership of one in-flight identity
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlightRegistry>,
    identity: EventIdentity,
    token: CancellationToken,
}

impl InFlightGuard {
    pub fn identity(&self) -> &EventIdentity {
        &self.identity
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.tasks.remove(&self.identity);
        debug!("Released in-flight slot for {}", self.identity);
    }
}
