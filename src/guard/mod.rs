mod apply_token;
mod echo_guard;
mod error;

pub use apply_token::{ApplyToken, ApplyTokenGenerator};
pub use echo_guard::EchoGuard;
pub use error::GuardError;
