use crate::message::MemberValue;

use super::decl::MemberDecl;
use super::error::MemberError;

/// The declarative opt-in surface for remoting. A concrete type exposes a
/// static table of named members plus accessors for them; a dispatch hub
/// reads the table at attach time. No code weaving: the table and the
/// accessors are ordinary Rust.
///
/// `set_member` must run the type's own validation, so applying a remote
/// change exercises the same invariants as a local write.
pub trait Remotable: Send {
    fn type_name(&self) -> &'static str;

    /// Every member this type opts into remoting.
    fn member_decls(&self) -> &'static [MemberDecl];

    fn get_member(&self, member: &str) -> Result<MemberValue, MemberError>;

    fn set_member(&mut self, member: &str, value: MemberValue) -> Result<(), MemberError>;

    fn invoke_member(&mut self, member: &str, args: MemberValue)
        -> Result<MemberValue, MemberError>;

    /// Look up a member's declaration, if it opted in.
    fn find_decl(&self, member: &str) -> Option<MemberDecl> {
        self.member_decls()
            .iter()
            .find(|decl| decl.name == member)
            .copied()
    }
}
