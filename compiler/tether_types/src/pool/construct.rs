//! Shape construction helpers for the pool.
//!
//! Every public way of building a compound shape lives here, so the
//! normalizations below hold for every interned shape:
//!
//! - `Nullable(Nullable(x))` is `Nullable(x)`
//! - `Nullable(Void)` is `Void`
//! - `AsyncResult(Some(Void))` is the void-result form

use crate::{ClassId, PrimitiveKind, ShapeData, ShapeId, ShapeTag};

use super::ShapePool;

impl ShapePool {
    /// The pre-interned shape of a primitive kind.
    #[inline]
    pub fn primitive(&self, kind: PrimitiveKind) -> ShapeId {
        kind.shape()
    }

    /// Create an array shape `Container<elem>`.
    pub fn array(&mut self, elem: ShapeId) -> ShapeId {
        self.intern(ShapeData::Array(elem))
    }

    /// Create a nullable shape `inner | absent`.
    pub fn nullable(&mut self, inner: ShapeId) -> ShapeId {
        if inner == ShapeId::VOID || self.tag(inner) == ShapeTag::Nullable {
            return inner;
        }
        self.intern(ShapeData::Nullable(inner))
    }

    /// Create a deferred result shape. `None` (or `Some(VOID)`) is the
    /// void-result form.
    pub fn async_result(&mut self, inner: Option<ShapeId>) -> ShapeId {
        let inner = inner.filter(|&id| id != ShapeId::VOID);
        self.intern(ShapeData::AsyncResult(inner))
    }

    /// Create the void-result deferred shape.
    pub fn async_void(&mut self) -> ShapeId {
        self.async_result(None)
    }

    /// Create a reference to an exported class.
    pub fn user_exported(&mut self, class: ClassId) -> ShapeId {
        self.intern(ShapeData::UserExported(class))
    }

    /// Create a delegate shape `(params) -> ret`.
    pub fn delegate(&mut self, params: &[ShapeId], ret: ShapeId) -> ShapeId {
        self.intern(ShapeData::Delegate {
            params: params.into(),
            ret,
        })
    }
}
