use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the core/process that owns the real instance of a remoted
/// object.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one remoted object within its owner's namespace.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a newly wrapped local instance.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The (owner, instance) pair that addresses a remoted object across the
/// channel. Immutable once assigned; this pair is the entire wire contract
/// peers use to hand off references to remoted objects.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct InstanceIdentity {
    owner: OwnerId,
    instance: InstanceId,
}

impl InstanceIdentity {
    pub fn new(owner: OwnerId, instance: InstanceId) -> Self {
        Self { owner, instance }
    }

    /// Identity for a freshly wrapped local instance.
    pub fn generate(owner: OwnerId) -> Self {
        Self {
            owner,
            instance: InstanceId::generate(),
        }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    /// Canonical, stable key suitable for routing and for deduplicating
    /// proxies. Equal identities produce equal keys regardless of creation
    /// order.
    pub fn canonical_key(&self) -> String {
        format!("{}/{}", self.owner.0, self.instance.0)
    }
}

impl fmt::Display for InstanceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.0, self.instance.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_fields_compare_and_hash_equal() {
        let a = InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new("lib"));
        let b = InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new("lib"));
        assert_eq!(a, b);
        assert_eq!(a.canonical_key(), b.canonical_key());

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn canonical_keys_differ_per_owner_namespace() {
        let a = InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new("lib"));
        let b = InstanceIdentity::new(OwnerId::new("core-2"), InstanceId::new("lib"));
        assert_ne!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn generated_instance_ids_are_unique() {
        let owner = OwnerId::new("core-1");
        let a = InstanceIdentity::generate(owner.clone());
        let b = InstanceIdentity::generate(owner);
        assert_ne!(a, b);
    }

    #[test]
    fn identity_round_trips_as_the_serialized_pair() {
        let identity = InstanceIdentity::new(OwnerId::new("core-1"), InstanceId::new("recent"));
        let wire = serde_json::to_string(&identity).expect("serialize");
        let back: InstanceIdentity = serde_json::from_str(&wire).expect("deserialize");
        assert_eq!(identity, back);
    }
}
