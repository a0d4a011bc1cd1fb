use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::identity::InstanceIdentity;

use super::apply_token::{ApplyToken, ApplyTokenGenerator};
use super::error::GuardError;

/// Short-lived registry marking "this instance is about to receive a
/// remotely-applied change on this call, do not republish it."
///
/// The only mutable state shared across all dispatch hubs. Entries for
/// different tokens are independent; insert/consume for one token are
/// paired, never concurrent.
#[derive(Default)]
pub struct EchoGuard {
    entries: DashMap<ApplyToken, InstanceIdentity>,
    tokens: ApplyTokenGenerator,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh call-scoped token for one apply.
    pub fn issue_token(&self) -> ApplyToken {
        self.tokens.next_token()
    }

    /// Called immediately before writing an inbound change into the real
    /// object, so exactly one local notification gets swallowed.
    pub fn mark_expected(
        &self,
        token: ApplyToken,
        target: &InstanceIdentity,
    ) -> Result<(), GuardError> {
        match self.entries.entry(token) {
            Entry::Occupied(_) => Err(GuardError::AlreadyMarked { token }),
            Entry::Vacant(vacant) => {
                vacant.insert(target.clone());
                Ok(())
            }
        }
    }

    /// Called from an interception enter callback. Removes the entry and
    /// returns true only when `candidate` matches the marked target; a
    /// genuine local change that happens to interleave leaves the entry
    /// untouched and still propagates.
    pub fn try_consume(&self, token: ApplyToken, candidate: &InstanceIdentity) -> bool {
        self.entries
            .remove_if(&token, |_, marked| marked == candidate)
            .is_some()
    }

    /// Drop a leftover entry after a failed apply so it cannot leak into a
    /// later unrelated write. Returns whether an entry was present.
    pub fn clear(&self, token: ApplyToken) -> bool {
        self.entries.remove(&token).is_some()
    }

    pub fn is_marked(&self, token: ApplyToken) -> bool {
        self.entries.contains_key(&token)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{InstanceId, OwnerId};

    fn identity(name: &str) -> InstanceIdentity {
        InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new(name))
    }

    #[test]
    fn consume_matches_target_exactly_once() {
        let guard = EchoGuard::new();
        let token = guard.issue_token();
        let target = identity("lib");

        guard.mark_expected(token, &target).expect("mark");
        assert!(guard.try_consume(token, &target));
        assert!(!guard.try_consume(token, &target));
        assert_eq!(guard.pending(), 0);
    }

    #[test]
    fn mismatched_candidate_leaves_entry_untouched() {
        let guard = EchoGuard::new();
        let token = guard.issue_token();
        let marked = identity("lib");
        let other = identity("recent");

        guard.mark_expected(token, &marked).expect("mark");
        assert!(!guard.try_consume(token, &other));
        assert!(guard.is_marked(token));
        assert!(guard.try_consume(token, &marked));
    }

    #[test]
    fn distinct_tokens_do_not_interfere() {
        let guard = EchoGuard::new();
        let first = guard.issue_token();
        let second = guard.issue_token();
        let target = identity("lib");

        guard.mark_expected(first, &target).expect("mark first");
        guard.mark_expected(second, &target).expect("mark second");
        assert!(guard.try_consume(first, &target));
        assert!(guard.is_marked(second));
    }
}
