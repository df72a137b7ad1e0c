//! Structural shape data.
//!
//! `ShapeData` is the hash key of the pool: two shapes are the same shape
//! exactly when their `ShapeData` values are equal.

use crate::{ClassId, PrimitiveKind, ShapeId, ShapeTag};

/// One node of the shape model.
///
/// Children are referenced by [`ShapeId`], so the data stays small and
/// hashing never recurses.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ShapeData {
    Primitive(PrimitiveKind),
    Boolean,
    CharacterUnit,
    DateValue,
    Void,
    Unknown,
    OpaqueHostObject,
    Array(ShapeId),
    Nullable(ShapeId),
    /// `None` is the void-result form.
    AsyncResult(Option<ShapeId>),
    UserExported(ClassId),
    Delegate {
        params: Box<[ShapeId]>,
        ret: ShapeId,
    },
}

impl ShapeData {
    /// The tag for this node.
    pub const fn tag(&self) -> ShapeTag {
        match self {
            Self::Primitive(_) => ShapeTag::Primitive,
            Self::Boolean => ShapeTag::Boolean,
            Self::CharacterUnit => ShapeTag::CharacterUnit,
            Self::DateValue => ShapeTag::DateValue,
            Self::Void => ShapeTag::Void,
            Self::Unknown => ShapeTag::Unknown,
            Self::OpaqueHostObject => ShapeTag::OpaqueHostObject,
            Self::Array(_) => ShapeTag::Array,
            Self::Nullable(_) => ShapeTag::Nullable,
            Self::AsyncResult(_) => ShapeTag::AsyncResult,
            Self::UserExported(_) => ShapeTag::UserExported,
            Self::Delegate { .. } => ShapeTag::Delegate,
        }
    }

    /// The wrapped shape for `Array`, `Nullable` and non-void `AsyncResult`.
    pub const fn wrapped(&self) -> Option<ShapeId> {
        match self {
            Self::Array(inner) | Self::Nullable(inner) | Self::AsyncResult(Some(inner)) => {
                Some(*inner)
            }
            _ => None,
        }
    }
}
