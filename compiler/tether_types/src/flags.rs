//! Pre-computed shape metadata flags.
//!
//! `ShapeFlags` are computed once at interning time and cached, so the
//! renderers can ask "does this need a conversion?" without walking the
//! shape.
//!
//! Flags are organized into:
//! - **Presence flags**: what the shape contains, propagated to wrappers
//! - **Category flags**: what kind of shape this node itself is

use bitflags::bitflags;

bitflags! {
    /// Pre-computed shape properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ShapeFlags: u32 {
        // === Presence Flags (bits 0-7) ===

        /// Some part of the shape needs a marshalling transform.
        const REQUIRES_CONVERSION = 1 << 0;
        /// The terminal exported class can be built from a plain literal,
        /// so values flowing into the boundary need a runtime form check.
        const SUPPORTS_CLIENT_CONSTRUCTION = 1 << 1;
        /// Contains an exported class reference.
        const HAS_USER_CLASS = 1 << 2;

        // === Category Flags (bits 8-15) ===

        /// Array, Nullable or AsyncResult.
        const IS_WRAPPER = 1 << 8;
        /// Host value type (needs an explicit unwrap when nullable).
        const IS_VALUE_TYPE = 1 << 9;
        /// Primitive, boolean, character or date.
        const IS_PRIMITIVE_LIKE = 1 << 10;
        /// Crosses the boundary as an opaque handle.
        const IS_HANDLE = 1 << 11;
        /// Delegate.
        const IS_DELEGATE = 1 << 12;
    }
}

impl ShapeFlags {
    /// Flags that propagate from child shapes to wrappers.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::REQUIRES_CONVERSION.bits()
            | Self::SUPPORTS_CLIENT_CONSTRUCTION.bits()
            | Self::HAS_USER_CLASS.bits(),
    );

    /// Flags a delegate inherits from its parameter and return shapes.
    ///
    /// Client construction is a property of the value itself, and a
    /// delegate is never built from a literal.
    pub const DELEGATE_PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::REQUIRES_CONVERSION.bits() | Self::HAS_USER_CLASS.bits(),
    );

    /// Check if a marshalling transform is needed anywhere in the shape.
    #[inline]
    pub const fn needs_conversion(self) -> bool {
        self.contains(Self::REQUIRES_CONVERSION)
    }

    /// Check if the shape reaches an exported class.
    #[inline]
    pub const fn has_user_class(self) -> bool {
        self.contains(Self::HAS_USER_CLASS)
    }

    /// Check if values of this shape may arrive as plain literals.
    #[inline]
    pub const fn supports_client_construction(self) -> bool {
        self.contains(Self::SUPPORTS_CLIENT_CONSTRUCTION)
    }

    /// Combine flags from a child shape.
    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    /// Combine propagated flags from multiple children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        let mut result = Self::empty();
        for child in children {
            result = result.union(Self::propagate_from(child));
        }
        result
    }
}

impl Default for ShapeFlags {
    fn default() -> Self {
        Self::empty()
    }
}
