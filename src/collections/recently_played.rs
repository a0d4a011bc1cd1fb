use crate::member::{MemberDecl, MemberError, Remotable};
use crate::message::MemberValue;

use super::{expect_string, expect_string_list, expect_u64};

const MEMBERS: &[MemberDecl] = &[
    MemberDecl::property("entries"),
    MemberDecl::property("max_entries"),
    MemberDecl::method("record"),
];

const DEFAULT_MAX_ENTRIES: u64 = 50;

/// Most-recent-first playback history, capped at `max_entries`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RecentlyPlayed {
    entries: Vec<String>,
    max_entries: u64,
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentlyPlayed {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }

    /// Lowering the cap truncates existing entries.
    pub fn set_max_entries(&mut self, max: u64) -> Result<(), MemberError> {
        if max == 0 {
            return Err(MemberError::InvalidValue {
                member: "max_entries".to_string(),
                reason: "max_entries must be at least 1".to_string(),
            });
        }
        self.max_entries = max;
        self.truncate();
        Ok(())
    }

    /// Record one playback, most recent first.
    pub fn record(&mut self, playable_id: impl Into<String>) {
        self.entries.insert(0, playable_id.into());
        self.truncate();
    }

    fn truncate(&mut self) {
        self.entries.truncate(self.max_entries as usize);
    }
}

impl Remotable for RecentlyPlayed {
    fn type_name(&self) -> &'static str {
        "RecentlyPlayed"
    }

    fn member_decls(&self) -> &'static [MemberDecl] {
        MEMBERS
    }

    fn get_member(&self, member: &str) -> Result<MemberValue, MemberError> {
        match member {
            "entries" => Ok(MemberValue::from(self.entries.clone())),
            "max_entries" => Ok(MemberValue::from(self.max_entries)),
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }

    fn set_member(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError> {
        match member {
            "entries" => {
                self.entries = expect_string_list(member, &value)?;
                self.truncate();
                Ok(())
            }
            "max_entries" => {
                let max = expect_u64(member, &value)?;
                self.set_max_entries(max)
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
        args: MemberValue,
    ) -> Result<MemberValue, MemberError> {
        match member {
            "record" => {
                let playable_id = expect_string(member, &args)?;
                self.record(playable_id);
                Ok(MemberValue::from(self.entries.len() as u64))
            }
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
    fn record_keeps_most_recent_first_within_cap() {
        let mut recent = RecentlyPlayed::new();
        recent.set_max_entries(2).expect("cap");
        recent.record("track-1");
        recent.record("track-2");
        recent.record("track-3");
        assert_eq!(recent.entries(), ["track-3", "track-2"]);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut recent = RecentlyPlayed::new();
        let result = recent.set_member("max_entries", MemberValue::from(0u64));
        assert!(matches!(result, Err(MemberError::InvalidValue { .. })));
        assert_eq!(recent.max_entries(), DEFAULT_MAX_ENTRIES);
    }
}
