use crate::guard::ApplyToken;
use crate::identity::InstanceIdentity;
use crate::message::{ChangeKind, MemberValue};

use super::decl::MemberKind;
use super::error::MemberError;
use super::hooks::{HookSet, MemberAccess};
use super::remotable::Remotable;

/// The real object plus its attached interception hooks.
///
/// Writes and invocations run the enter -> apply -> exit pipeline (or
/// enter -> fault), synchronously on the caller's context with no
/// suspension point between the enter notification and the apply. Each
/// hook's enter decision is threaded back into its own exit callback.
pub struct RemotedInstance<T: Remotable> {
    identity: InstanceIdentity,
    inner: T,
    hooks: HookSet,
}

impl<T: Remotable> RemotedInstance<T> {
    pub fn new(identity: InstanceIdentity, inner: T) -> Self {
        Self {
            identity,
            inner,
            hooks: HookSet::new(),
        }
    }

    pub fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn hooks_mut(&mut self) -> &mut HookSet {
        &mut self.hooks
    }

    pub fn get(&self, member: &str) -> Result<MemberValue, MemberError> {
        self.inner.get_member(member)
    }

    /// Write a property through the normal setter path, notifying hooks.
    pub fn set(
        &mut self,
        member: &str,
        value: MemberValue,
        token: Option<ApplyToken>,
    ) -> Result<(), MemberError> {
        let decl = self.require_kind(member, MemberKind::Property)?;
        let old = self.inner.get_member(decl.name)?;
        let access = MemberAccess {
            target: &self.identity,
            member,
            kind: ChangeKind::Set,
            old_value: Some(&old),
            new_value: &value,
            token,
        };

        let decisions = self.hooks.enter(&access);
        match self.inner.set_member(member, value.clone()) {
            Ok(()) => {
                self.hooks.exit(&access, &decisions);
                Ok(())
            }
            Err(fault) => {
                self.hooks.fault(&access, &fault);
                Err(fault)
            }
        }
    }

    /// Invoke a method through the pipeline, notifying hooks.
    pub fn invoke(
        &mut self,
        member: &str,
        args: MemberValue,
        token: Option<ApplyToken>,
    ) -> Result<MemberValue, MemberError> {
        self.require_kind(member, MemberKind::Method)?;
        let access = MemberAccess {
            target: &self.identity,
            member,
            kind: ChangeKind::Invoke,
            old_value: None,
            new_value: &args,
            token,
        };

        let decisions = self.hooks.enter(&access);
        match self.inner.invoke_member(member, args.clone()) {
            Ok(result) => {
                self.hooks.exit(&access, &decisions);
                Ok(result)
            }
            Err(fault) => {
                self.hooks.fault(&access, &fault);
                Err(fault)
            }
        }
    }

    fn require_kind(
        &self,
        member: &str,
        expected: MemberKind,
    ) -> Result<super::decl::MemberDecl, MemberError> {
        let decl =
            self.inner
                .find_decl(member)
                .ok_or_else(|| MemberError::UnknownMember {
                    type_name: self.inner.type_name(),
                    member: member.to_string(),
                })?;
        if decl.kind != expected {
            return Err(MemberError::KindMismatch {
                type_name: self.inner.type_name(),
                member: member.to_string(),
                expected: expected.label(),
                actual: decl.kind.label(),
            });
        }
        Ok(decl)
    }
}
