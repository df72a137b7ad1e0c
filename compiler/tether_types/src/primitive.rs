//! Primitive value kinds.

use std::fmt;

use crate::ShapeId;

/// Kind carried by a `Primitive` shape.
///
/// Host integer and floating point widths stay distinct so the boundary
/// layer can name them exactly; the client layer may collapse several kinds
/// onto one name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    String,
}

impl PrimitiveKind {
    /// Every primitive kind, in pre-interning order.
    pub const ALL: [Self; 7] = [
        Self::Byte,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Single,
        Self::Double,
        Self::String,
    ];

    /// The pre-interned shape for this kind.
    #[inline]
    pub const fn shape(self) -> ShapeId {
        match self {
            Self::Byte => ShapeId::BYTE,
            Self::Int16 => ShapeId::INT16,
            Self::Int32 => ShapeId::INT32,
            Self::Int64 => ShapeId::INT64,
            Self::Single => ShapeId::SINGLE,
            Self::Double => ShapeId::DOUBLE,
            Self::String => ShapeId::STRING,
        }
    }

    /// Whether the host represents this kind as a value type.
    ///
    /// Nullable value types need an explicit unwrap on the host side.
    #[inline]
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::String)
    }

    /// Stable lowercase name, used in debug formatting.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Single => "single",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
