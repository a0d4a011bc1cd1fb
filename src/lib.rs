//! # Corelink
//! Remote object mirroring and change synchronization for music-source
//! cores.
//!
//! A "local" side owns the real object; "remote" sides hold lightweight
//! proxies that mirror reads and forward writes across a channel. A
//! [`DispatchHub`] intercepts local mutations and publishes them as
//! [`ChangeMessage`]s, and applies inbound messages through the object's
//! normal setter path while an [`EchoGuard`] keeps them from being
//! republished (no infinite echo).

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod channel;
mod collections;
mod guard;
mod hub;
mod identity;
mod member;
mod message;
mod proxy;
mod registry;

pub use channel::{ChangeChannel, ChannelError, MemoryChannel};
pub use collections::{CollectionGroup, Discoverables, RecentlyPlayed, SearchHistory};
pub use guard::{ApplyToken, ApplyTokenGenerator, EchoGuard, GuardError};
pub use hub::{DispatchHub, HubError};
pub use identity::{InstanceId, InstanceIdentity, OwnerId};
pub use member::{
    HookDecision, HookHandle, HookSet, InterceptionHook, MemberAccess, MemberDecl, MemberError,
    MemberKind, Remotable, RemotedInstance,
};
pub use message::{ChangeKind, ChangeMessage, Direction, MemberValue, SNAPSHOT_MEMBER};
pub use proxy::{
    CollectionGroupProxy, DiscoverablesProxy, MemberCache, ProxyError, ProxyModel,
    RecentlyPlayedProxy, SearchHistoryProxy, SubscriberProxy,
};
pub use registry::{ProxyRegistry, RegistryError, RemoteTarget};
