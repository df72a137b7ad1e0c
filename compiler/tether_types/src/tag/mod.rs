//! Shape kind tag for tag-driven dispatch.
//!
//! Each shape in the pool has a `ShapeTag` identifying its kind.
//!
//! # Tag Categories
//!
//! Tags are organized into semantic ranges:
//! - 0-15: Leaves (no children)
//! - 16-31: Wrappers (exactly one child, possibly absent for `AsyncResult`)
//! - 32-47: Exported class references
//! - 48-63: Callables

use std::fmt;

/// Shape kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ShapeTag {
    // === Leaves (0-15) ===
    /// Numeric or string primitive.
    Primitive = 0,
    /// Boolean.
    Boolean = 1,
    /// Single UTF-16 code unit.
    CharacterUnit = 2,
    /// Date/time value.
    DateValue = 3,
    /// No value.
    Void = 4,
    /// Unresolved type.
    Unknown = 5,
    /// Host object without a shape mapping.
    OpaqueHostObject = 6,

    // Reserved: 7-15 for future leaves

    // === Wrappers (16-31) ===
    /// Array `Container<{inner}>`.
    Array = 16,
    /// Absent-able `{inner} | absent`.
    Nullable = 17,
    /// Deferred `Deferred<{inner}>`, or the void-result form.
    AsyncResult = 18,

    // Reserved: 19-31 for future wrappers

    // === Exported classes (32-47) ===
    /// Reference to a class in the exported graph.
    UserExported = 32,

    // === Callables (48-63) ===
    /// Delegate `(params) -> ret`.
    Delegate = 48,
}

impl ShapeTag {
    /// Check if this tag is a primitive-like terminal.
    ///
    /// Primitive-like terminals can be copied into a snapshot as-is.
    #[inline]
    pub const fn is_primitive_like(self) -> bool {
        matches!(
            self,
            Self::Primitive | Self::Boolean | Self::CharacterUnit | Self::DateValue
        )
    }

    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Boolean => "boolean",
            Self::CharacterUnit => "char",
            Self::DateValue => "date",
            Self::Void => "void",
            Self::Unknown => "unknown",
            Self::OpaqueHostObject => "opaque",
            Self::Array => "array",
            Self::Nullable => "nullable",
            Self::AsyncResult => "async",
            Self::UserExported => "exported",
            Self::Delegate => "delegate",
        }
    }
}

impl fmt::Debug for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeTag::{}", self.name())
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Compile-time size assertion: ShapeTag must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<ShapeTag>() == 1);

#[cfg(test)]
mod tests;
