use std::sync::Arc;

use crate::channel::ChangeChannel;
use crate::guard::EchoGuard;
use crate::hub::{DispatchHub, HubError};
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::member::{MemberError, Remotable};
use crate::message::{ChangeMessage, MemberValue};

use super::error::ProxyError;
use super::subscriber::SubscriberProxy;

/// A dual-mode proxy for one remoted object. The construction path fixes
/// the mode for the object's lifetime: `wrap` produces a publisher over a
/// live local instance, `reference` a subscriber that stands in for one
/// living on the other side. The identity never changes either way.
pub enum ProxyModel<T: Remotable> {
    Publisher(DispatchHub<T>),
    Subscriber(SubscriberProxy),
}

impl<T: Remotable> ProxyModel<T> {
    /// Wrap a live local instance: assigns a freshly generated identity and
    /// attaches a dispatch hub so the instance becomes remotable.
    pub fn wrap(
        instance: T,
        owner: OwnerId,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        let identity = InstanceIdentity::generate(owner);
        Self::Publisher(DispatchHub::attach(instance, identity, guard, channel))
    }

    /// Reference an instance owned elsewhere, from exactly the serialized
    /// `(owner, instance)` pair.
    pub fn reference(
        owner: OwnerId,
        instance: InstanceId,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self::Subscriber(SubscriberProxy::reference(owner, instance, channel))
    }

    pub fn identity(&self) -> &InstanceIdentity {
        match self {
            Self::Publisher(hub) => hub.identity(),
            Self::Subscriber(proxy) => proxy.identity(),
        }
    }

    pub fn is_publisher(&self) -> bool {
        matches!(self, Self::Publisher(_))
    }

    pub fn as_publisher(&self) -> Option<&DispatchHub<T>> {
        match self {
            Self::Publisher(hub) => Some(hub),
            Self::Subscriber(_) => None,
        }
    }

    pub fn as_publisher_mut(&mut self) -> Option<&mut DispatchHub<T>> {
        match self {
            Self::Publisher(hub) => Some(hub),
            Self::Subscriber(_) => None,
        }
    }

    pub fn as_subscriber(&self) -> Option<&SubscriberProxy> {
        match self {
            Self::Subscriber(proxy) => Some(proxy),
            Self::Publisher(_) => None,
        }
    }

    pub fn as_subscriber_mut(&mut self) -> Option<&mut SubscriberProxy> {
        match self {
            Self::Subscriber(proxy) => Some(proxy),
            Self::Publisher(_) => None,
        }
    }

    /// Read a member: publishers read the real instance, subscribers the
    /// last cached value (`None` while still unknown).
    pub fn get(&self, member: &str) -> Result<Option<MemberValue>, MemberError> {
        match self {
            Self::Publisher(hub) => hub.get_local(member).map(Some),
            Self::Subscriber(proxy) => Ok(proxy.cached(member).cloned()),
        }
    }

    /// Write a member: publishers mutate the real instance (publishing the
    /// change), subscribers forward a request to the owning peer.
    pub fn set(&mut self, member: &str, value: MemberValue) -> Result<(), ProxyError> {
        match self {
            Self::Publisher(hub) => Ok(hub.set_local(member, value)?),
            Self::Subscriber(proxy) => Ok(proxy.set_remote(member, value)?),
        }
    }

    /// Invoke a method. Publishers run it and return the result; for
    /// subscribers the call is forwarded and the result arrives later as
    /// re-published state, so `None` is returned.
    pub fn invoke(
        &mut self,
        member: &str,
        args: MemberValue,
    ) -> Result<Option<MemberValue>, ProxyError> {
        match self {
            Self::Publisher(hub) => Ok(Some(hub.invoke_local(member, args)?)),
            Self::Subscriber(proxy) => {
                proxy.invoke_remote(member, args)?;
                Ok(None)
            }
        }
    }

    /// Apply one inbound message. A publisher services it as a request from
    /// a subscriber (the genuine mutation happens here and is re-published
    /// once); a subscriber folds it into its cache.
    pub fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        match self {
            Self::Publisher(hub) => hub.apply_write_request(message),
            Self::Subscriber(proxy) => proxy.apply_inbound(message),
        }
    }

    /// Ask the owner for a snapshot. A no-op on publishers, which already
    /// hold the real state.
    pub fn request_snapshot(&self) -> Result<(), ProxyError> {
        match self {
            Self::Publisher(_) => Ok(()),
            Self::Subscriber(proxy) => Ok(proxy.request_snapshot()?),
        }
    }

    /// Drain events received from the owning side. Always empty on
    /// publishers.
    pub fn take_events(&mut self) -> Vec<(String, MemberValue)> {
        match self {
            Self::Publisher(_) => Vec::new(),
            Self::Subscriber(proxy) => proxy.take_events(),
        }
    }

    /// Detach the publisher's interception; a no-op for subscribers, which
    /// are destroyed by dropping.
    pub fn detach(&mut self) -> Result<(), HubError> {
        match self {
            Self::Publisher(hub) => hub.detach(),
            Self::Subscriber(_) => Ok(()),
        }
    }

    // Typed read helpers shared by the per-collection facades.

    pub(crate) fn get_string(&self, member: &str) -> Option<String> {
        self.get(member)
            .ok()
            .flatten()
            .and_then(|value| value.as_str().map(str::to_string))
    }

    pub(crate) fn get_u64(&self, member: &str) -> Option<u64> {
        self.get(member).ok().flatten().and_then(|value| value.as_u64())
    }

    pub(crate) fn get_string_list(&self, member: &str) -> Option<Vec<String>> {
        self.get(member).ok().flatten().and_then(|value| {
            value.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
        })
    }
}
