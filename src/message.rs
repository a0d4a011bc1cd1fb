use serde::{Deserialize, Serialize};

use crate::identity::InstanceIdentity;

/// Opaque member payload. Dynamic values keep the wire format independent
/// of concrete types beyond their registered member names.
pub type MemberValue = serde_json::Value;

/// Reserved member name on a `Get` message requesting a full property
/// snapshot from the owner.
pub const SNAPSHOT_MEMBER: &str = "*";

/// What kind of member change a message describes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ChangeKind {
    Get,
    Set,
    Invoke,
    EventRaised,
}

/// Which way the message is traveling relative to the holder.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Outbound,
    Inbound,
}

/// The wire-level unit describing one member change for one addressed
/// instance. Carries enough to replay the mutation on the receiving side
/// without knowledge of the concrete type.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ChangeMessage {
    pub target: InstanceIdentity,
    pub member_name: String,
    pub kind: ChangeKind,
    pub payload: MemberValue,
    /// Value the member held before the change, when the publishing side
    /// knew it. Informational; the receiving side applies `payload` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<MemberValue>,
    pub direction: Direction,
}

impl ChangeMessage {
    pub fn set_outbound(
        target: InstanceIdentity,
        member_name: &str,
        payload: MemberValue,
    ) -> Self {
        Self {
            target,
            member_name: member_name.to_string(),
            kind: ChangeKind::Set,
            payload,
            previous: None,
            direction: Direction::Outbound,
        }
    }

    pub fn invoke_outbound(
        target: InstanceIdentity,
        member_name: &str,
        args: MemberValue,
    ) -> Self {
        Self {
            target,
            member_name: member_name.to_string(),
            kind: ChangeKind::Invoke,
            payload: args,
            previous: None,
            direction: Direction::Outbound,
        }
    }

    pub fn event_outbound(
        target: InstanceIdentity,
        member_name: &str,
        payload: MemberValue,
    ) -> Self {
        Self {
            target,
            member_name: member_name.to_string(),
            kind: ChangeKind::EventRaised,
            payload,
            previous: None,
            direction: Direction::Outbound,
        }
    }

    /// Request a full property snapshot from the owning side.
    pub fn snapshot_request(target: InstanceIdentity) -> Self {
        Self {
            target,
            member_name: SNAPSHOT_MEMBER.to_string(),
            kind: ChangeKind::Get,
            payload: MemberValue::Null,
            previous: None,
            direction: Direction::Outbound,
        }
    }

    /// Flip the message to the receiving side's point of view.
    pub fn into_inbound(mut self) -> Self {
        self.direction = Direction::Inbound;
        self
    }
}
