//! Type-shape model for Tether.
//!
//! Every type that appears on an exported API surface is classified into a
//! *shape*: a small tagged union describing how the value crosses the
//! runtime/client boundary (primitive, nullable, array, deferred result,
//! exported class, delegate, ...).
//!
//! # Shape Interning
//!
//! Shapes live in a [`ShapePool`] owned by one generation run. Interning is
//! structural: building `Nullable(Array(Int32))` twice yields the same
//! [`ShapeId`], so equality between shapes is an O(1) id comparison.
//!
//! - Leaf shapes are pre-interned at fixed ids ([`ShapeId::INT32`], ...)
//! - Children are always interned before their parents
//! - [`ShapeFlags`] are computed once at interning time and propagate from
//!   children to wrappers
//!
//! The pool is not shared between runs: independent runs may
//! execute in parallel, each with its own pool, and no locking is involved.

mod data;
mod flags;
mod id;
mod pool;
mod primitive;
mod tag;

pub use data::ShapeData;
pub use flags::ShapeFlags;
pub use id::{ClassId, ShapeId};
pub use pool::{ClassNames, ShapePool};
pub use primitive::PrimitiveKind;
pub use tag::ShapeTag;
