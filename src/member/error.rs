use thiserror::Error;

/// Errors raised by member accessors and the interception pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("{type_name} has no remoted member named `{member}`")]
    UnknownMember {
        type_name: &'static str,
        member: String,
    },

    #[error("member `{member}` on {type_name} is a {actual}, not a {expected}")]
    KindMismatch {
        type_name: &'static str,
        member: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The type's own setter rejected the new value. The member keeps its
    /// prior valid state.
    #[error("invalid value for `{member}`: {reason}")]
    InvalidValue { member: String, reason: String },

    #[error("malformed payload for `{member}`: {reason}")]
    MalformedPayload { member: String, reason: String },
}
