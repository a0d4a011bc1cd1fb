use crate::member::{MemberDecl, MemberError, Remotable};
use crate::message::MemberValue;

use super::{expect_string_list, expect_u64};

const MEMBERS: &[MemberDecl] = &[
    MemberDecl::property("featured"),
    MemberDecl::property("refresh_minutes"),
    MemberDecl::method("refresh"),
];

const DEFAULT_REFRESH_MINUTES: u64 = 60;

/// Editorial/discovery content surfaced by a core.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Discoverables {
    featured: Vec<String>,
    refresh_minutes: u64,
    refresh_count: u64,
}

impl Default for Discoverables {
    fn default() -> Self {
        Self::new()
    }
}

impl Discoverables {
    pub fn new() -> Self {
        Self {
            featured: Vec::new(),
            refresh_minutes: DEFAULT_REFRESH_MINUTES,
            refresh_count: 0,
        }
    }

    pub fn featured(&self) -> &[String] {
        &self.featured
    }

    pub fn refresh_minutes(&self) -> u64 {
        self.refresh_minutes
    }

    pub fn set_refresh_minutes(&mut self, minutes: u64) -> Result<(), MemberError> {
        if minutes == 0 {
            return Err(MemberError::InvalidValue {
                member: "refresh_minutes".to_string(),
                reason: "refresh interval must be at least 1 minute".to_string(),
            });
        }
        self.refresh_minutes = minutes;
        Ok(())
    }

    pub fn set_featured(&mut self, featured: Vec<String>) {
        self.featured = featured;
    }

    /// Counts a refresh pass; the owning core repopulates `featured`.
    pub fn refresh(&mut self) -> u64 {
        self.refresh_count += 1;
        self.refresh_count
    }
}

impl Remotable for Discoverables {
    fn type_name(&self) -> &'static str {
        "Discoverables"
    }

    fn member_decls(&self) -> &'static [MemberDecl] {
        MEMBERS
    }

    fn get_member(&self, member: &str) -> Result<MemberValue, MemberError> {
        match member {
            "featured" => Ok(MemberValue::from(self.featured.clone())),
            "refresh_minutes" => Ok(MemberValue::from(self.refresh_minutes)),
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }

    fn set_member(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError> {
        match member {
            "featured" => {
                self.featured = expect_string_list(member, &value)?;
                Ok(())
            }
            "refresh_minutes" => {
                let minutes = expect_u64(member, &value)?;
                self.set_refresh_minutes(minutes)
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
            "refresh" => Ok(MemberValue::from(self.refresh())),
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
    fn zero_refresh_interval_is_rejected() {
        let mut discoverables = Discoverables::new();
        let result = discoverables.set_member("refresh_minutes", MemberValue::from(0u64));
        assert!(matches!(result, Err(MemberError::InvalidValue { .. })));
        assert_eq!(discoverables.refresh_minutes(), DEFAULT_REFRESH_MINUTES);
    }
}
