use crate::member::{MemberDecl, MemberError, Remotable};
use crate::message::MemberValue;

use super::{expect_string, expect_u64};

const MEMBERS: &[MemberDecl] = &[
    MemberDecl::property("name"),
    MemberDecl::property("total_item_count"),
    MemberDecl::method("clear_items"),
    MemberDecl::event("items_changed"),
];

/// A generic playable collection group (library, playlist folder, ...).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CollectionGroup {
    name: String,
    total_item_count: u64,
}

impl CollectionGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_item_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_item_count(&self) -> u64 {
        self.total_item_count
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), MemberError> {
        if name.trim().is_empty() {
            return Err(MemberError::InvalidValue {
                member: "name".to_string(),
                reason: "collection group name must not be empty".to_string(),
            });
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_total_item_count(&mut self, count: u64) {
        self.total_item_count = count;
    }

    /// Drops all items, returning how many were cleared.
    pub fn clear_items(&mut self) -> u64 {
        std::mem::take(&mut self.total_item_count)
    }
}

impl Remotable for CollectionGroup {
    fn type_name(&self) -> &'static str {
        "CollectionGroup"
    }

    fn member_decls(&self) -> &'static [MemberDecl] {
        MEMBERS
    }

    fn get_member(&self, member: &str) -> Result<MemberValue, MemberError> {
        match member {
            "name" => Ok(MemberValue::from(self.name.clone())),
            "total_item_count" => Ok(MemberValue::from(self.total_item_count)),
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }

    fn set_member(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError> {
        match member {
            "name" => {
                let name = expect_string(member, &value)?;
                self.set_name(&name)
            }
            "total_item_count" => {
                self.total_item_count = expect_u64(member, &value)?;
                Ok(())
            }
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }

    fn invoke_member(
        &mut self,
        member: &str,
        _args: MemberValue,
    ) -> Result<MemberValue, MemberError> {
        match member {
            "clear_items" => Ok(MemberValue::from(self.clear_items())),
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected_and_state_kept() {
        let mut group = CollectionGroup::new("Library");
        let result = group.set_member("name", MemberValue::from("  "));
        assert!(matches!(result, Err(MemberError::InvalidValue { .. })));
        assert_eq!(group.name(), "Library");
    }

    #[test]
    fn clear_items_reports_cleared_count() {
        let mut group = CollectionGroup::new("Library");
        group.set_total_item_count(12);
        let cleared = group
            .invoke_member("clear_items", MemberValue::Null)
            .expect("invoke");
        assert_eq!(cleared, MemberValue::from(12u64));
        assert_eq!(group.total_item_count(), 0);
    }
}
