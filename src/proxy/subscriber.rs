use std::sync::Arc;

use log::warn;

use crate::channel::{ChangeChannel, ChannelError};
use crate::hub::HubError;
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::message::{ChangeKind, ChangeMessage, Direction, MemberValue};

use super::cache::MemberCache;

/// Stand-in for an object that exists only on the other side. Holds the
/// identity plus a cache of last-known values; writes are forwarded to the
/// owning peer and never applied locally.
pub struct SubscriberProxy {
    identity: InstanceIdentity,
    cache: MemberCache,
    channel: Arc<dyn ChangeChannel>,
    drift_count: u64,
    dropped_count: u64,
}

impl SubscriberProxy {
    /// Construct from exactly the serialized `(owner, instance)` pair.
    /// Reconstructing twice from the same pair yields behaviorally
    /// equivalent proxies.
    pub fn reference(
        owner: OwnerId,
        instance: InstanceId,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            identity: InstanceIdentity::new(owner, instance),
            cache: MemberCache::new(),
            channel,
            drift_count: 0,
            dropped_count: 0,
        }
    }

    pub fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    /// Last value learned from inbound messages; `None` until the first
    /// snapshot or update arrives.
    pub fn cached(&self, member: &str) -> Option<&MemberValue> {
        self.cache.get(member)
    }

    pub fn cache(&self) -> &MemberCache {
        &self.cache
    }

    /// Forward a write to the owning peer. The local cache is untouched;
    /// it changes only when the owner re-publishes the applied value.
    pub fn set_remote(&self, member: &str, value: MemberValue) -> Result<(), ChannelError> {
        self.channel
            .send(ChangeMessage::set_outbound(self.identity.clone(), member, value))
    }

    /// Forward a method invocation to the owning peer.
    pub fn invoke_remote(&self, member: &str, args: MemberValue) -> Result<(), ChannelError> {
        self.channel
            .send(ChangeMessage::invoke_outbound(self.identity.clone(), member, args))
    }

    /// Ask the owner for a full property snapshot.
    pub fn request_snapshot(&self) -> Result<(), ChannelError> {
        self.channel
            .send(ChangeMessage::snapshot_request(self.identity.clone()))
    }

    /// Apply one inbound message to the cache. Never produces outbound
    /// traffic; a subscriber cannot echo.
    pub fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        if message.direction != Direction::Inbound {
            return Err(HubError::NotInbound);
        }
        if message.target != self.identity {
            self.dropped_count += 1;
            return Err(HubError::TargetMismatch {
                message: message.target,
                hub: self.identity.clone(),
            });
        }
        match message.kind {
            ChangeKind::Set => {
                self.cache.store(message.member_name, message.payload);
                Ok(())
            }
            ChangeKind::EventRaised => {
                self.cache.push_event(message.member_name, message.payload);
                Ok(())
            }
            ChangeKind::Get | ChangeKind::Invoke => {
                // Only the owning side services reads and invocations.
                self.drift_count += 1;
                warn!(
                    "SubscriberProxy: ignoring {:?} addressed to subscriber {}",
                    message.kind, self.identity
                );
                Ok(())
            }
        }
    }

    /// Drain events received from the owning side.
    pub fn take_events(&mut self) -> Vec<(String, MemberValue)> {
        self.cache.take_events()
    }

    pub fn drift_count(&self) -> u64 {
        self.drift_count
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }
}
