//! Concrete remotable collection types of a music-source core. Domain
//! behavior is intentionally thin; what matters here is the member tables
//! and the validating setters the sync engine drives.

mod collection_group;
mod discoverables;
mod recently_played;
mod search_history;

pub use collection_group::CollectionGroup;
pub use discoverables::Discoverables;
pub use recently_played::RecentlyPlayed;
pub use search_history::SearchHistory;

use crate::member::MemberError;
use crate::message::MemberValue;

pub(crate) fn expect_string(member: &str, value: &MemberValue) -> Result<String, MemberError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| MemberError::MalformedPayload {
            member: member.to_string(),
            reason: format!("expected a string, got {value}"),
        })
}

pub(crate) fn expect_u64(member: &str, value: &MemberValue) -> Result<u64, MemberError> {
    value
        .as_u64()
        .ok_or_else(|| MemberError::MalformedPayload {
            member: member.to_string(),
            reason: format!("expected an unsigned integer, got {value}"),
        })
}

pub(crate) fn expect_string_list(
    member: &str,
    value: &MemberValue,
) -> Result<Vec<String>, MemberError> {
    let items = value
        .as_array()
        .ok_or_else(|| MemberError::MalformedPayload {
            member: member.to_string(),
            reason: format!("expected a list of strings, got {value}"),
        })?;
    items
        .iter()
        .map(|item| expect_string(member, item))
        .collect()
}
