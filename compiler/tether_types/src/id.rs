//! Shape and class index handles.
//!
//! `ShapeId` is the canonical shape representation: every shape is stored
//! once in the [`ShapePool`](crate::ShapePool) and referenced by its 32-bit
//! index. `ClassId` indexes the exported classes of the class graph.

use std::fmt;

/// A 32-bit index into the shape pool.
///
/// Shapes are compared by index equality (O(1)), not structural comparison.
/// The pool guarantees that structurally equal shapes share one index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ShapeId(u32);

impl ShapeId {
    // === Leaf Shapes (indices 0-12) ===
    // Pre-interned at pool creation for O(1) access.

    /// 8-bit unsigned integer.
    pub const BYTE: Self = Self(0);
    /// 16-bit signed integer.
    pub const INT16: Self = Self(1);
    /// 32-bit signed integer.
    pub const INT32: Self = Self(2);
    /// 64-bit signed integer.
    pub const INT64: Self = Self(3);
    /// 32-bit float.
    pub const SINGLE: Self = Self(4);
    /// 64-bit float.
    pub const DOUBLE: Self = Self(5);
    /// UTF-16 string.
    pub const STRING: Self = Self(6);
    /// Boolean.
    pub const BOOLEAN: Self = Self(7);
    /// Single UTF-16 code unit.
    pub const CHAR: Self = Self(8);
    /// Date/time value, native on both sides of the boundary.
    pub const DATE: Self = Self(9);
    /// No value.
    pub const VOID: Self = Self(10);
    /// Type the symbol collaborator could not resolve.
    pub const UNKNOWN: Self = Self(11);
    /// Host object with no shape mapping, passed as an opaque handle.
    pub const OPAQUE: Self = Self(12);

    /// Number of pre-interned leaf shapes.
    pub const LEAF_COUNT: u32 = 13;

    /// First index for dynamically interned shapes.
    pub const FIRST_DYNAMIC: u32 = Self::LEAF_COUNT;

    /// Create an id from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into pool storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Human-readable name for pre-interned leaves, `None` for dynamic shapes.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("byte"),
            1 => Some("int16"),
            2 => Some("int32"),
            3 => Some("int64"),
            4 => Some("single"),
            5 => Some("double"),
            6 => Some("string"),
            7 => Some("bool"),
            8 => Some("char"),
            9 => Some("date"),
            10 => Some("void"),
            11 => Some("unknown"),
            12 => Some("opaque"),
            _ => None,
        }
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ShapeId::{}", name.to_uppercase()),
            None => write!(f, "ShapeId({})", self.0),
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "shape#{}", self.0),
        }
    }
}

/// Index of an exported class in the class graph.
///
/// Assigned in declaration order by the graph builder.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    /// Create a class id from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into class storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

// Compile-time size assertion: ShapeId must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<ShapeId>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_indices_are_contiguous() {
        let leaves = [
            ShapeId::BYTE,
            ShapeId::INT16,
            ShapeId::INT32,
            ShapeId::INT64,
            ShapeId::SINGLE,
            ShapeId::DOUBLE,
            ShapeId::STRING,
            ShapeId::BOOLEAN,
            ShapeId::CHAR,
            ShapeId::DATE,
            ShapeId::VOID,
            ShapeId::UNKNOWN,
            ShapeId::OPAQUE,
        ];
        for (expected, id) in leaves.iter().enumerate() {
            assert_eq!(id.index(), expected);
            assert!(id.name().is_some());
        }
        assert_eq!(leaves.len(), ShapeId::LEAF_COUNT as usize);
    }

    #[test]
    fn dynamic_ids_have_no_name() {
        let id = ShapeId::from_raw(ShapeId::FIRST_DYNAMIC);
        assert_eq!(id.name(), None);
        assert_eq!(id.to_string(), "shape#13");
    }

    #[test]
    fn debug_names_leaves() {
        assert_eq!(format!("{:?}", ShapeId::CHAR), "ShapeId::CHAR");
        assert_eq!(format!("{:?}", ShapeId::from_raw(40)), "ShapeId(40)");
    }

    #[test]
    fn class_id_display() {
        assert_eq!(ClassId::from_raw(3).to_string(), "class#3");
        assert_eq!(ClassId::from_raw(3).index(), 3);
    }
}
