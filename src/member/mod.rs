mod decl;
mod error;
mod hooks;
mod instance;
mod remotable;

pub use decl::{MemberDecl, MemberKind};
pub use error::MemberError;
pub use hooks::{HookDecision, HookHandle, HookSet, InterceptionHook, MemberAccess};
pub use instance::RemotedInstance;
pub use remotable::Remotable;
