use std::sync::Arc;

use crate::guard::ApplyToken;
use crate::identity::InstanceIdentity;
use crate::message::{ChangeKind, MemberValue};

use super::error::MemberError;

/// What a hook's enter callback decided about the notification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HookDecision {
    /// A genuinely local change; the exit callback should act on it.
    Observe,
    /// The notification corresponds to a remotely-applied change and must
    /// be swallowed.
    Suppress,
}

/// Context delivered with every interception callback. Always carries the
/// target identity so hooks attached to different instances of the same
/// type can filter to their own object.
pub struct MemberAccess<'a> {
    pub target: &'a InstanceIdentity,
    pub member: &'a str,
    pub kind: ChangeKind,
    pub old_value: Option<&'a MemberValue>,
    pub new_value: &'a MemberValue,
    /// Present only when a dispatch hub is applying an inbound change.
    pub token: Option<ApplyToken>,
}

/// Synchronous observation of member writes and invocations on one
/// instance. The hook reports what it saw; suppression policy belongs to
/// the dispatch hub behind it.
pub trait InterceptionHook: Send + Sync {
    /// Before the new value is applied. The returned decision is handed
    /// back to this hook's `on_exit` for the same access.
    fn on_enter(&self, access: &MemberAccess<'_>) -> HookDecision;

    /// After the value was applied successfully.
    fn on_exit(&self, access: &MemberAccess<'_>, decision: HookDecision);

    /// Applying the value raised a failure; `on_exit` is not called.
    fn on_fault(&self, access: &MemberAccess<'_>, fault: &MemberError);
}

/// Identifies one attached hook for deterministic detach.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HookHandle(u64);

/// Per-instance subscription list. Replaces the process-wide static event
/// list of older designs: attach returns a handle, detach is deterministic
/// and race-free.
#[derive(Default)]
pub struct HookSet {
    hooks: Vec<(HookHandle, Arc<dyn InterceptionHook>)>,
    next_handle: u64,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, hook: Arc<dyn InterceptionHook>) -> HookHandle {
        let handle = HookHandle(self.next_handle);
        self.next_handle += 1;
        self.hooks.push((handle, hook));
        handle
    }

    /// Returns whether the handle was attached.
    pub fn detach(&mut self, handle: HookHandle) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(attached, _)| *attached != handle);
        self.hooks.len() != before
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub(crate) fn enter(&self, access: &MemberAccess<'_>) -> Vec<HookDecision> {
        self.hooks
            .iter()
            .map(|(_, hook)| hook.on_enter(access))
            .collect()
    }

    pub(crate) fn exit(&self, access: &MemberAccess<'_>, decisions: &[HookDecision]) {
        for ((_, hook), decision) in self.hooks.iter().zip(decisions) {
            hook.on_exit(access, *decision);
        }
    }

    pub(crate) fn fault(&self, access: &MemberAccess<'_>, fault: &MemberError) {
        for (_, hook) in &self.hooks {
            hook.on_fault(access, fault);
        }
    }
}
