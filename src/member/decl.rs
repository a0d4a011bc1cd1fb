/// What sort of member a declaration opts into remoting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberKind {
    Property,
    Method,
    Event,
}

impl MemberKind {
    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Event => "event",
        }
    }
}

/// One entry in a type's declarative member table. Listing a member here is
/// the opt-in that makes it visible to dispatch hubs at attach time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemberDecl {
    pub name: &'static str,
    pub kind: MemberKind,
}

impl MemberDecl {
    pub const fn property(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Property,
        }
    }

    pub const fn method(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Method,
        }
    }

    pub const fn event(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Event,
        }
    }
}
