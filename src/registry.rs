use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::warn;
use thiserror::Error;

use crate::hub::{DispatchHub, HubError};
use crate::identity::InstanceIdentity;
use crate::member::Remotable;
use crate::message::ChangeMessage;
use crate::proxy::{ProxyModel, SubscriberProxy};

/// Errors from the proxy registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// At most one live target may hold a given identity at a time
    /// (single-writer invariant on the publisher side).
    #[error("a target is already registered for {key}")]
    DuplicateIdentity { key: String },

    #[error("target lock poisoned")]
    LockPoisoned,
}

/// Anything a channel's inbound messages can be routed to.
pub trait RemoteTarget: Send {
    fn identity(&self) -> &InstanceIdentity;

    fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError>;
}

impl<T: Remotable> RemoteTarget for DispatchHub<T> {
    fn identity(&self) -> &InstanceIdentity {
        DispatchHub::identity(self)
    }

    fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        self.apply_write_request(message)
    }
}

impl RemoteTarget for SubscriberProxy {
    fn identity(&self) -> &InstanceIdentity {
        SubscriberProxy::identity(self)
    }

    fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        SubscriberProxy::apply_inbound(self, message)
    }
}

impl<T: Remotable> RemoteTarget for ProxyModel<T> {
    fn identity(&self) -> &InstanceIdentity {
        ProxyModel::identity(self)
    }

    fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        ProxyModel::apply_inbound(self, message)
    }
}

/// Routes inbound messages to live targets by canonical identity key.
///
/// An owned, explicitly-constructed map: one registry per side, no
/// process-wide statics. Messages for unknown or detached identities are
/// dropped and reported; nothing propagates back to the channel
/// collaborator.
#[derive(Default)]
pub struct ProxyRegistry {
    targets: HashMap<String, Arc<Mutex<dyn RemoteTarget>>>,
    faults: Vec<HubError>,
    dropped_count: u64,
}

impl ProxyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: Arc<Mutex<dyn RemoteTarget>>) -> Result<(), RegistryError> {
        let key = {
            let locked = target.lock().map_err(|_| RegistryError::LockPoisoned)?;
            locked.identity().canonical_key()
        };
        match self.targets.entry(key) {
            Entry::Occupied(occupied) => Err(RegistryError::DuplicateIdentity {
                key: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(target);
                Ok(())
            }
        }
    }

    pub fn deregister(
        &mut self,
        identity: &InstanceIdentity,
    ) -> Option<Arc<Mutex<dyn RemoteTarget>>> {
        self.targets.remove(&identity.canonical_key())
    }

    pub fn contains(&self, identity: &InstanceIdentity) -> bool {
        self.targets.contains_key(&identity.canonical_key())
    }

    /// Deliver one message from the channel. Infallible toward the caller:
    /// failures are counted, logged, and collected as typed faults for
    /// whichever layer owns error reporting.
    pub fn deliver(&mut self, message: ChangeMessage) {
        let message = message.into_inbound();
        let key = message.target.canonical_key();
        let Some(target) = self.targets.get(&key) else {
            self.dropped_count += 1;
            warn!(
                "ProxyRegistry: dropping message for unknown target {}",
                message.target
            );
            return;
        };
        let Ok(mut locked) = target.lock() else {
            self.dropped_count += 1;
            warn!(
                "ProxyRegistry: target {} lock poisoned; message dropped",
                message.target
            );
            return;
        };
        if let Err(error) = locked.apply_inbound(message) {
            if matches!(error, HubError::Detached { .. }) {
                self.dropped_count += 1;
                warn!("ProxyRegistry: target gone, message dropped: {error}");
            } else {
                warn!("ProxyRegistry: inbound apply failed: {error}");
            }
            self.faults.push(error);
        }
    }

    /// Messages dropped for unknown or detached targets.
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }

    /// Drain faults surfaced while applying inbound messages.
    pub fn take_faults(&mut self) -> Vec<HubError> {
        std::mem::take(&mut self.faults)
    }
}
