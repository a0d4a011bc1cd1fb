use crate::member::{MemberDecl, MemberError, Remotable};
use crate::message::MemberValue;

use super::{expect_string, expect_string_list};

const MEMBERS: &[MemberDecl] = &[
    MemberDecl::property("queries"),
    MemberDecl::method("push_query"),
    MemberDecl::method("clear"),
];

const QUERY_CAP: usize = 50;

/// Deduplicated, most-recent-first search query history.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SearchHistory {
    queries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Repeated queries move to the front instead of duplicating.
    pub fn push_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.queries.retain(|existing| *existing != query);
        self.queries.insert(0, query);
        self.queries.truncate(QUERY_CAP);
    }

    pub fn clear(&mut self) -> usize {
        std::mem::take(&mut self.queries).len()
    }
}

impl Remotable for SearchHistory {
    fn type_name(&self) -> &'static str {
        "SearchHistory"
    }

    fn member_decls(&self) -> &'static [MemberDecl] {
        MEMBERS
    }

    fn get_member(&self, member: &str) -> Result<MemberValue, MemberError> {
        match member {
            "queries" => Ok(MemberValue::from(self.queries.clone())),
            _ => Err(MemberError::UnknownMember {
                type_name: self.type_name(),
                member: member.to_string(),
            }),
        }
    }

    fn set_member(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError> {
        match member {
            "queries" => {
                self.queries = expect_string_list(member, &value)?;
                self.queries.truncate(QUERY_CAP);
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
        args: MemberValue,
    ) -> Result<MemberValue, MemberError> {
        match member {
            "push_query" => {
                let query = expect_string(member, &args)?;
                self.push_query(query);
                Ok(MemberValue::from(self.queries.len() as u64))
            }
            "clear" => Ok(MemberValue::from(self.clear() as u64)),
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
    fn repeated_query_moves_to_front() {
        let mut history = SearchHistory::new();
        history.push_query("jazz");
        history.push_query("ambient");
        history.push_query("jazz");
        assert_eq!(history.queries(), ["jazz", "ambient"]);
    }

    #[test]
    fn clear_reports_removed_count() {
        let mut history = SearchHistory::new();
        history.push_query("jazz");
        history.push_query("ambient");
        assert_eq!(history.clear(), 2);
        assert!(history.queries().is_empty());
    }
}
