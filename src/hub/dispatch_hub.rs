use std::sync::Arc;

use log::{debug, info, warn};

use crate::channel::ChangeChannel;
use crate::guard::EchoGuard;
use crate::identity::InstanceIdentity;
use crate::member::{
    HookDecision, HookHandle, InterceptionHook, MemberAccess, MemberError, MemberKind,
    RemotedInstance, Remotable,
};
use crate::message::{ChangeKind, ChangeMessage, MemberValue, SNAPSHOT_MEMBER};

use super::error::HubError;

/// The interception/dispatch hub for one remoted object.
///
/// Owns the managed instance, translates local mutations into outbound
/// change messages, and applies inbound messages without re-triggering
/// outbound traffic. Maintains no history beyond the transient echo-guard
/// entry and the attached hooks.
pub struct DispatchHub<T: Remotable> {
    instance: RemotedInstance<T>,
    guard: Arc<EchoGuard>,
    channel: Arc<dyn ChangeChannel>,
    publish_handle: Option<HookHandle>,
    drift_count: u64,
    dropped_count: u64,
}

/// The hub's own interception hook: its enter callback consumes the echo
/// guard for remotely-applied writes, its exit callback publishes genuinely
/// local ones.
struct PublishHook {
    identity: InstanceIdentity,
    guard: Arc<EchoGuard>,
    channel: Arc<dyn ChangeChannel>,
}

impl InterceptionHook for PublishHook {
    fn on_enter(&self, access: &MemberAccess<'_>) -> HookDecision {
        if *access.target != self.identity {
            return HookDecision::Observe;
        }
        if let Some(token) = access.token {
            if self.guard.try_consume(token, &self.identity) {
                return HookDecision::Suppress;
            }
        }
        HookDecision::Observe
    }

    fn on_exit(&self, access: &MemberAccess<'_>, decision: HookDecision) {
        if decision == HookDecision::Suppress || *access.target != self.identity {
            return;
        }
        // Owner-side method runs locally; any property changes it makes
        // publish themselves through this same hook.
        if access.kind != ChangeKind::Set {
            return;
        }
        let mut message = ChangeMessage::set_outbound(
            self.identity.clone(),
            access.member,
            access.new_value.clone(),
        );
        message.previous = access.old_value.cloned();
        if let Err(error) = self.channel.send(message) {
            warn!(
                "DispatchHub: outbound publish of `{}` on {} failed: {}",
                access.member, self.identity, error
            );
        }
    }

    fn on_fault(&self, access: &MemberAccess<'_>, fault: &MemberError) {
        debug!(
            "DispatchHub: local apply of `{}` on {} faulted: {}",
            access.member, self.identity, fault
        );
    }
}

impl<T: Remotable> DispatchHub<T> {
    /// Wrap `instance` and register interception for every member it
    /// declares. The hub is born attached; `detach` is the only state
    /// transition.
    pub fn attach(
        instance: T,
        identity: InstanceIdentity,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        let mut remoted = RemotedInstance::new(identity.clone(), instance);
        let hook = Arc::new(PublishHook {
            identity,
            guard: Arc::clone(&guard),
            channel: Arc::clone(&channel),
        });
        let publish_handle = remoted.hooks_mut().attach(hook);
        info!(
            "DispatchHub: attached {} as {}",
            remoted.inner().type_name(),
            remoted.identity()
        );
        Self {
            instance: remoted,
            guard,
            channel,
            publish_handle: Some(publish_handle),
            drift_count: 0,
            dropped_count: 0,
        }
    }

    pub fn identity(&self) -> &InstanceIdentity {
        self.instance.identity()
    }

    pub fn is_attached(&self) -> bool {
        self.publish_handle.is_some()
    }

    pub fn instance(&self) -> &T {
        self.instance.inner()
    }

    /// Inbound messages that named an unknown member (protocol drift).
    pub fn drift_count(&self) -> u64 {
        self.drift_count
    }

    /// Inbound messages dropped after detach or misrouting.
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }

    pub fn get_local(&self, member: &str) -> Result<MemberValue, MemberError> {
        self.instance.get(member)
    }

    /// A genuine local mutation: runs the normal setter path and publishes
    /// exactly one outbound change message through the interception hook.
    pub fn set_local(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError> {
        self.instance.set(member, value, None)
    }

    /// Invoke a method locally; property changes it caused are republished
    /// by diffing the property set around the call.
    pub fn invoke_local(
        &mut self,
        member: &str,
        args: MemberValue,
    ) -> Result<MemberValue, MemberError> {
        let before = self.property_values();
        let result = self.instance.invoke(member, args, None)?;
        self.publish_changed(&before);
        Ok(result)
    }

    /// Broadcast a declared event from the owning side.
    pub fn raise_event(&mut self, member: &str, payload: MemberValue) -> Result<(), HubError> {
        if self.publish_handle.is_none() {
            return Err(HubError::Detached {
                identity: self.identity().clone(),
            });
        }
        match self.instance.inner().find_decl(member) {
            Some(decl) if decl.kind == MemberKind::Event => {}
            Some(decl) => {
                return Err(HubError::LocalFault {
                    member: member.to_string(),
                    source: MemberError::KindMismatch {
                        type_name: self.instance.inner().type_name(),
                        member: member.to_string(),
                        expected: MemberKind::Event.label(),
                        actual: decl.kind.label(),
                    },
                });
            }
            None => {
                return Err(HubError::LocalFault {
                    member: member.to_string(),
                    source: MemberError::UnknownMember {
                        type_name: self.instance.inner().type_name(),
                        member: member.to_string(),
                    },
                });
            }
        }
        self.channel.send(ChangeMessage::event_outbound(
            self.identity().clone(),
            member,
            payload,
        ))?;
        Ok(())
    }

    /// Apply an inbound change to the real object while suppressing
    /// republication: mark the guard, write through the normal setter path
    /// with the call-scoped token, and rely on the publish hook's enter
    /// callback to consume the entry. Produces zero outbound messages for
    /// the applied member.
    pub fn apply_remote_change(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        let ChangeMessage {
            target,
            member_name,
            kind,
            payload,
            ..
        } = self.check_inbound(message)?;

        match kind {
            ChangeKind::Set => {
                if !self.member_is(&member_name, MemberKind::Property) {
                    return self.record_drift(&member_name);
                }
                let token = self.guard.issue_token();
                self.guard.mark_expected(token, &target)?;
                match self.instance.set(&member_name, payload, Some(token)) {
                    Ok(()) => {
                        if self.guard.clear(token) {
                            warn!(
                                "DispatchHub: echo guard entry for `{}` on {} was never consumed",
                                member_name, target
                            );
                        }
                        Ok(())
                    }
                    Err(fault) => {
                        self.guard.clear(token);
                        Err(HubError::ApplyFault {
                            member: member_name,
                            source: fault,
                        })
                    }
                }
            }
            ChangeKind::Invoke => {
                if !self.member_is(&member_name, MemberKind::Method) {
                    return self.record_drift(&member_name);
                }
                let token = self.guard.issue_token();
                self.guard.mark_expected(token, &target)?;
                let before = self.property_values();
                match self.instance.invoke(&member_name, payload, Some(token)) {
                    Ok(_) => {
                        self.guard.clear(token);
                        self.publish_changed(&before);
                        Ok(())
                    }
                    Err(fault) => {
                        self.guard.clear(token);
                        Err(HubError::ApplyFault {
                            member: member_name,
                            source: fault,
                        })
                    }
                }
            }
            ChangeKind::Get => {
                self.answer_get(&member_name);
                Ok(())
            }
            // Only the owning side raises events.
            ChangeKind::EventRaised => self.record_drift(&member_name),
        }
    }

    /// Apply a subscriber's write request through the normal local path.
    /// The genuine mutation happens here, and the interception hook
    /// publishes the confirmed change exactly once, which is how the
    /// requesting proxy's cache learns the result.
    pub fn apply_write_request(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        let ChangeMessage {
            member_name,
            kind,
            payload,
            ..
        } = self.check_inbound(message)?;

        match kind {
            ChangeKind::Set => {
                if !self.member_is(&member_name, MemberKind::Property) {
                    return self.record_drift(&member_name);
                }
                self.set_local(&member_name, payload)
                    .map_err(|fault| HubError::ApplyFault {
                        member: member_name,
                        source: fault,
                    })
            }
            ChangeKind::Invoke => {
                if !self.member_is(&member_name, MemberKind::Method) {
                    return self.record_drift(&member_name);
                }
                self.invoke_local(&member_name, payload)
                    .map(|_| ())
                    .map_err(|fault| HubError::ApplyFault {
                        member: member_name,
                        source: fault,
                    })
            }
            ChangeKind::Get => {
                self.answer_get(&member_name);
                Ok(())
            }
            ChangeKind::EventRaised => self.record_drift(&member_name),
        }
    }

    /// Unregister interception. After this the hub drops inbound messages
    /// for the instance; detaching twice is a programming error.
    pub fn detach(&mut self) -> Result<(), HubError> {
        match self.publish_handle.take() {
            Some(handle) => {
                self.instance.hooks_mut().detach(handle);
                info!("DispatchHub: detached {}", self.identity());
                Ok(())
            }
            None => Err(HubError::AlreadyDetached {
                identity: self.identity().clone(),
            }),
        }
    }

    /// Recover the wrapped instance, detaching if still attached.
    pub fn into_inner(mut self) -> T {
        if let Some(handle) = self.publish_handle.take() {
            self.instance.hooks_mut().detach(handle);
        }
        self.instance.into_inner()
    }

    fn check_inbound(&mut self, message: ChangeMessage) -> Result<ChangeMessage, HubError> {
        if self.publish_handle.is_none() {
            self.dropped_count += 1;
            return Err(HubError::Detached {
                identity: self.identity().clone(),
            });
        }
        if message.direction != crate::message::Direction::Inbound {
            return Err(HubError::NotInbound);
        }
        if message.target != *self.identity() {
            self.dropped_count += 1;
            return Err(HubError::TargetMismatch {
                message: message.target,
                hub: self.identity().clone(),
            });
        }
        Ok(message)
    }

    fn member_is(&self, member: &str, kind: MemberKind) -> bool {
        self.instance
            .inner()
            .find_decl(member)
            .is_some_and(|decl| decl.kind == kind)
    }

    /// Unknown member: recoverable drift between differently-versioned
    /// peers, never fatal.
    fn record_drift(&mut self, member: &str) -> Result<(), HubError> {
        self.drift_count += 1;
        warn!(
            "DispatchHub: ignoring inbound message for unknown member `{}` on {}",
            member,
            self.identity()
        );
        Ok(())
    }

    fn answer_get(&mut self, member: &str) {
        if member == SNAPSHOT_MEMBER {
            for (name, value) in self.property_values() {
                let message =
                    ChangeMessage::set_outbound(self.identity().clone(), name, value);
                self.send_or_warn(message);
            }
            return;
        }
        if !self.member_is(member, MemberKind::Property) {
            // Drift, not fatal.
            let _ = self.record_drift(member);
            return;
        }
        match self.instance.get(member) {
            Ok(value) => {
                let message = ChangeMessage::set_outbound(self.identity().clone(), member, value);
                self.send_or_warn(message);
            }
            Err(error) => warn!(
                "DispatchHub: snapshot read of `{}` on {} failed: {}",
                member,
                self.identity(),
                error
            ),
        }
    }

    fn property_values(&self) -> Vec<(&'static str, MemberValue)> {
        self.instance
            .inner()
            .member_decls()
            .iter()
            .filter(|decl| decl.kind == MemberKind::Property)
            .filter_map(|decl| self.instance.get(decl.name).ok().map(|v| (decl.name, v)))
            .collect()
    }

    fn publish_changed(&self, before: &[(&'static str, MemberValue)]) {
        for (name, old) in before {
            let Ok(new) = self.instance.get(name) else {
                continue;
            };
            if new != *old {
                let mut message =
                    ChangeMessage::set_outbound(self.identity().clone(), name, new);
                message.previous = Some(old.clone());
                self.send_or_warn(message);
            }
        }
    }

    fn send_or_warn(&self, message: ChangeMessage) {
        let member = message.member_name.clone();
        if let Err(error) = self.channel.send(message) {
            warn!(
                "DispatchHub: outbound send of `{}` on {} failed: {}",
                member,
                self.identity(),
                error
            );
        }
    }
}
