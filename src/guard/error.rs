use thiserror::Error;

use super::apply_token::ApplyToken;

/// Errors from the echo guard registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// At most one suppression may be pending per execution context at a
    /// time; marking the same token twice is a programming error.
    #[error("echo guard already holds a pending entry for {token:?}")]
    AlreadyMarked { token: ApplyToken },
}
