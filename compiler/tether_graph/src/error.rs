//! Graph construction errors.

use thiserror::Error;

/// Errors raised while building the class graph.
///
/// All of them abort generation; degradable cases (unknown host types)
/// never reach this type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A type from the declared unimplemented set appeared in a signature.
    #[error("type `{ty}` used by `{member}` is not supported across the interop boundary")]
    UnsupportedShape { ty: String, member: String },

    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),

    /// Two members of one class share a name.
    #[error("class `{class}` declares member `{member}` more than once")]
    DuplicateMember { class: String, member: String },

    /// An unqualified reference matches several exported classes.
    #[error("`{name}` used by `{member}` is ambiguous between {candidates}")]
    AmbiguousClass {
        name: String,
        member: String,
        candidates: String,
    },

    #[error("invalid delegate type `{ty}` used by `{member}`: {reason}")]
    InvalidDelegate {
        ty: String,
        member: String,
        reason: &'static str,
    },
}
