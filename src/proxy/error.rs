use thiserror::Error;

use crate::channel::ChannelError;
use crate::hub::HubError;
use crate::member::MemberError;

/// Errors surfaced by proxy models and their typed facades.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}
