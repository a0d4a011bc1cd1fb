use thiserror::Error;

use crate::channel::ChannelError;
use crate::guard::GuardError;
use crate::identity::InstanceIdentity;
use crate::member::MemberError;

/// Errors surfaced while dispatching changes for one managed instance.
#[derive(Debug, Error)]
pub enum HubError {
    /// The hub was detached; the inbound message is dropped ("target
    /// gone"). Recoverable: the channel collaborator must not fault.
    #[error("dispatch hub for {identity} is detached; message dropped")]
    Detached { identity: InstanceIdentity },

    /// Detaching twice is a programming error.
    #[error("dispatch hub for {identity} was already detached")]
    AlreadyDetached { identity: InstanceIdentity },

    /// The message was routed to the wrong hub.
    #[error("message addressed to {message} arrived at hub for {hub}")]
    TargetMismatch {
        message: InstanceIdentity,
        hub: InstanceIdentity,
    },

    /// Inbound entry points only accept inbound messages.
    #[error("message direction must be Inbound")]
    NotInbound,

    /// The real object's setter rejected a remotely-applied value. The
    /// object keeps its last successfully-applied state.
    #[error("applying remote change to `{member}` failed: {source}")]
    ApplyFault {
        member: String,
        #[source]
        source: MemberError,
    },

    /// A local operation on the hub's own instance failed.
    #[error("local operation on `{member}` failed: {source}")]
    LocalFault {
        member: String,
        #[source]
        source: MemberError,
    },

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}
