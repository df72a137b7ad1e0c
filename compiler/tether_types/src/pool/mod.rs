//! The shape pool: one interning cache per generation run.
//!
//! Shapes are stored in parallel `Vec`s (data and flags) indexed by
//! [`ShapeId`], with a hash map from structural data back to the id.
//! Leaf shapes are pre-interned in [`ShapeId`] constant order.

mod construct;
mod format;

pub use format::ClassNames;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{ClassId, PrimitiveKind, ShapeData, ShapeFlags, ShapeId, ShapeTag};

/// Interning cache for shapes.
///
/// Owned by exactly one generation run and passed explicitly. Structurally
/// equal shapes always receive the same [`ShapeId`].
#[derive(Clone, Debug)]
pub struct ShapePool {
    items: Vec<ShapeData>,
    flags: Vec<ShapeFlags>,
    dedup: FxHashMap<ShapeData, ShapeId>,
    /// Classes whose `UserExported` leaves carry `SUPPORTS_CLIENT_CONSTRUCTION`.
    constructible: FxHashSet<ClassId>,
}

impl ShapePool {
    /// Create a pool with every leaf shape pre-interned.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(64),
            flags: Vec::with_capacity(64),
            dedup: FxHashMap::default(),
            constructible: FxHashSet::default(),
        };

        for kind in PrimitiveKind::ALL {
            pool.intern(ShapeData::Primitive(kind));
        }
        pool.intern(ShapeData::Boolean);
        pool.intern(ShapeData::CharacterUnit);
        pool.intern(ShapeData::DateValue);
        pool.intern(ShapeData::Void);
        pool.intern(ShapeData::Unknown);
        pool.intern(ShapeData::OpaqueHostObject);

        debug_assert_eq!(pool.items.len(), ShapeId::FIRST_DYNAMIC as usize);
        pool
    }

    /// Number of interned shapes, leaves included.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A fresh pool always holds the leaf shapes, so it is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Intern raw shape data without normalization.
    ///
    /// Public construction goes through the helpers in `construct`, which
    /// normalize first.
    pub(crate) fn intern(&mut self, data: ShapeData) -> ShapeId {
        if let Some(&id) = self.dedup.get(&data) {
            return id;
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "a generation run never interns 2^32 shapes"
        )]
        let id = ShapeId::from_raw(self.items.len() as u32);
        let flags = self.compute_flags(&data);
        self.items.push(data.clone());
        self.flags.push(flags);
        self.dedup.insert(data, id);
        tracing::trace!(?id, shape = %self.format_shape(id), ?flags, "interned shape");
        id
    }

    fn compute_flags(&self, data: &ShapeData) -> ShapeFlags {
        match data {
            ShapeData::Primitive(kind) => {
                let mut flags = ShapeFlags::IS_PRIMITIVE_LIKE;
                if kind.is_value_type() {
                    flags |= ShapeFlags::IS_VALUE_TYPE;
                }
                flags
            }
            ShapeData::Boolean | ShapeData::DateValue => {
                ShapeFlags::IS_PRIMITIVE_LIKE | ShapeFlags::IS_VALUE_TYPE
            }
            ShapeData::CharacterUnit => {
                ShapeFlags::IS_PRIMITIVE_LIKE
                    | ShapeFlags::IS_VALUE_TYPE
                    | ShapeFlags::REQUIRES_CONVERSION
            }
            ShapeData::Void | ShapeData::Unknown => ShapeFlags::empty(),
            ShapeData::OpaqueHostObject => ShapeFlags::IS_HANDLE,
            ShapeData::Array(inner)
            | ShapeData::Nullable(inner)
            | ShapeData::AsyncResult(Some(inner)) => {
                ShapeFlags::IS_WRAPPER | ShapeFlags::propagate_from(self.flags(*inner))
            }
            ShapeData::AsyncResult(None) => ShapeFlags::IS_WRAPPER,
            ShapeData::UserExported(class) => {
                let mut flags = ShapeFlags::HAS_USER_CLASS
                    | ShapeFlags::REQUIRES_CONVERSION
                    | ShapeFlags::IS_HANDLE;
                if self.constructible.contains(class) {
                    flags |= ShapeFlags::SUPPORTS_CLIENT_CONSTRUCTION;
                }
                flags
            }
            ShapeData::Delegate { params, ret } => {
                let children = params
                    .iter()
                    .chain(std::iter::once(ret))
                    .map(|&child| self.flags(child));
                let propagated = ShapeFlags::propagate_all(children)
                    & ShapeFlags::DELEGATE_PROPAGATE_MASK;
                ShapeFlags::IS_DELEGATE | propagated
            }
        }
    }

    /// Record which classes offer the proxy/initializer union.
    ///
    /// Runs after classification. Flags are recomputed in id order; children
    /// always precede their parents, so one pass reaches every wrapper.
    pub fn mark_client_constructible(&mut self, classes: impl IntoIterator<Item = ClassId>) {
        self.constructible.extend(classes);
        for index in 0..self.items.len() {
            let flags = self.compute_flags(&self.items[index]);
            self.flags[index] = flags;
        }
        tracing::debug!(
            classes = self.constructible.len(),
            shapes = self.items.len(),
            "re-propagated client construction flags"
        );
    }

    // === Queries ===

    /// Get the structural data of a shape.
    #[inline]
    pub fn get(&self, id: ShapeId) -> &ShapeData {
        &self.items[id.index()]
    }

    /// Get the tag of a shape.
    #[inline]
    pub fn tag(&self, id: ShapeId) -> ShapeTag {
        self.items[id.index()].tag()
    }

    /// Get the cached flags of a shape.
    #[inline]
    pub fn flags(&self, id: ShapeId) -> ShapeFlags {
        self.flags[id.index()]
    }

    /// The shape wrapped by an `Array`, `Nullable` or non-void `AsyncResult`.
    #[inline]
    pub fn inner(&self, id: ShapeId) -> Option<ShapeId> {
        self.get(id).wrapped()
    }

    /// Strip every wrapper and return the terminal shape.
    ///
    /// The void-result `AsyncResult` form terminates in [`ShapeId::VOID`].
    pub fn terminal(&self, mut id: ShapeId) -> ShapeId {
        loop {
            match self.get(id) {
                ShapeData::AsyncResult(None) => return ShapeId::VOID,
                data => match data.wrapped() {
                    Some(inner) => id = inner,
                    None => return id,
                },
            }
        }
    }

    /// The exported class at the terminal of a shape, if any.
    pub fn user_class(&self, id: ShapeId) -> Option<ClassId> {
        match self.get(self.terminal(id)) {
            ShapeData::UserExported(class) => Some(*class),
            _ => None,
        }
    }
}

impl Default for ShapePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
