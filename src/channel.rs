use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::message::ChangeMessage;

/// Errors raised by a channel collaborator. `send` must either complete or
/// raise one of these; it never silently drops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("channel send failed: {reason}")]
    SendFailed { reason: String },

    #[error("channel is closed: {reason}")]
    Closed { reason: String },
}

/// The external transport collaborator. Fire-and-forget: ordering and
/// delivery per identity are the implementation's responsibility.
pub trait ChangeChannel: Send + Sync {
    fn send(&self, message: ChangeMessage) -> Result<(), ChannelError>;
}

/// In-process channel delivering messages in send order. Used by tests and
/// demos; real deployments plug their own transport in behind
/// [`ChangeChannel`].
#[derive(Clone, Default)]
pub struct MemoryChannel {
    queue: Arc<Mutex<VecDeque<ChangeMessage>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages waiting to be drained.
    pub fn pending(&self) -> usize {
        match self.queue.lock() {
            Ok(queue) => queue.len(),
            Err(_) => 0,
        }
    }

    /// Take all pending messages, flipped to the receiving side's point of
    /// view, in send order.
    pub fn drain(&self) -> Vec<ChangeMessage> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).map(ChangeMessage::into_inbound).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl ChangeChannel for MemoryChannel {
    fn send(&self, message: ChangeMessage) -> Result<(), ChannelError> {
        let mut queue = self.queue.lock().map_err(|_| ChannelError::SendFailed {
            reason: "memory channel queue lock poisoned".to_string(),
        })?;
        queue.push_back(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
    use crate::message::{Direction, MemberValue};

    #[test]
    fn drain_preserves_send_order_and_flips_direction() {
        let channel = MemoryChannel::new();
        let target = InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new("a"));

        channel
            .send(ChangeMessage::set_outbound(target.clone(), "first", MemberValue::from(1)))
            .expect("send");
        channel
            .send(ChangeMessage::set_outbound(target, "second", MemberValue::from(2)))
            .expect("send");

        let drained = channel.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].member_name, "first");
        assert_eq!(drained[1].member_name, "second");
        assert!(drained.iter().all(|m| m.direction == Direction::Inbound));
        assert_eq!(channel.pending(), 0);
    }
}
