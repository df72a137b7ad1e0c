//! Export-compatibility classifier.
//!
//! Decides, per class and per property, whether the client layer may offer
//! a plain-data `Snapshot` form and a plain-object `Initializer` form.
//! Snapshot compatibility is recursive through exported classes; it is
//! memoized per class, and a class met again while it is still being
//! classified counts as incompatible, so a reference cycle makes every
//! class on it incompatible.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use tether_types::{ClassId, ShapeData, ShapePool};

use crate::{ClassGraph, ClassInfo, PropertyInfo};

/// Per-property compatibility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyCompat {
    pub snapshot: bool,
    pub initializer: bool,
}

/// Per-class compatibility.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCompat {
    /// Non-static and every readable property is snapshot-compatible.
    pub snapshot: bool,
    /// Non-static, public constructor, every settable property is
    /// initializer-compatible.
    pub initializer: bool,
    /// Public parameterless constructor on a non-static class.
    pub accepts_initializer: bool,
    /// `accepts_initializer` and `initializer`: values may be passed as
    /// `Name | Name.Initializer`.
    pub offers_union: bool,
    /// Property indices exposed through the initializer literal.
    ///
    /// All or nothing: empty unless `initializer` holds, so a single settable
    /// property that is not initializer-compatible (a delegate-typed setter,
    /// say) drops the literal and the constructor's member initializers for
    /// every other settable property of the class too.
    pub member_initializers: Vec<usize>,
}

/// Classifier results for a whole graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    classes: Vec<ClassCompat>,
    properties: Vec<Vec<PropertyCompat>>,
}

impl Classification {
    pub fn class(&self, id: ClassId) -> Option<&ClassCompat> {
        self.classes.get(id.index())
    }

    pub fn property(&self, id: ClassId, index: usize) -> Option<PropertyCompat> {
        self.properties
            .get(id.index())
            .and_then(|props| props.get(index))
            .copied()
    }

    pub fn is_snapshot_compatible(&self, id: ClassId) -> bool {
        self.class(id).is_some_and(|c| c.snapshot)
    }

    pub fn is_initializer_compatible(&self, id: ClassId) -> bool {
        self.class(id).is_some_and(|c| c.initializer)
    }

    pub fn accepts_initializer(&self, id: ClassId) -> bool {
        self.class(id).is_some_and(|c| c.accepts_initializer)
    }

    pub fn offers_union(&self, id: ClassId) -> bool {
        self.class(id).is_some_and(|c| c.offers_union)
    }

    /// Narrowed member initializers of a class.
    pub fn member_initializers(&self, id: ClassId) -> &[usize] {
        self.class(id)
            .map_or(&[], |c| c.member_initializers.as_slice())
    }

    /// Classes whose values may arrive as plain literals.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "class counts fit in u32"
    )]
    pub fn union_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.offers_union)
            .map(|(i, _)| ClassId::from_raw(i as u32))
    }
}

/// Classify every class and property of a graph.
#[tracing::instrument(level = "debug", skip_all, fields(classes = graph.len()))]
pub fn classify(graph: &ClassGraph, pool: &ShapePool) -> Classification {
    CompatClassifier::new(graph, pool).classify_all()
}

/// Memoizing classifier over one graph.
///
/// Uses `RefCell` for the memo and the in-progress set so queries can take
/// `&self` while recursing.
pub struct CompatClassifier<'g> {
    graph: &'g ClassGraph,
    pool: &'g ShapePool,
    snapshot_cache: RefCell<FxHashMap<ClassId, bool>>,
    /// Classes currently being classified, for cycle detection.
    classifying: RefCell<FxHashSet<ClassId>>,
}

impl<'g> CompatClassifier<'g> {
    pub fn new(graph: &'g ClassGraph, pool: &'g ShapePool) -> Self {
        Self {
            graph,
            pool,
            snapshot_cache: RefCell::new(FxHashMap::default()),
            classifying: RefCell::new(FxHashSet::default()),
        }
    }

    /// Class-level snapshot compatibility.
    pub fn is_snapshot_compatible(&self, id: ClassId) -> bool {
        if let Some(&cached) = self.snapshot_cache.borrow().get(&id) {
            return cached;
        }

        let Some(class) = self.graph.get(id) else {
            return false;
        };

        if !self.classifying.borrow_mut().insert(id) {
            tracing::trace!(class = %class.qualified_name, "cycle; provisionally not snapshot-compatible");
            return false;
        }

        let result = !class.is_static
            && class
                .readable_properties()
                .all(|(_, prop)| self.is_property_snapshot_compatible(prop));

        self.classifying.borrow_mut().remove(&id);
        self.snapshot_cache.borrow_mut().insert(id, result);
        result
    }

    /// Readable, and the terminal shape is primitive-like or a
    /// snapshot-compatible class.
    pub fn is_property_snapshot_compatible(&self, prop: &PropertyInfo) -> bool {
        prop.has_public_getter && self.is_shape_snapshot_compatible(prop)
    }

    fn is_shape_snapshot_compatible(&self, prop: &PropertyInfo) -> bool {
        let terminal = self.pool.terminal(prop.shape);
        match self.pool.get(terminal) {
            ShapeData::UserExported(class) => self.is_snapshot_compatible(*class),
            data => data.tag().is_primitive_like(),
        }
    }

    /// Settable, snapshot-compatible, and an exported terminal class must
    /// itself accept a parameterless initializer.
    pub fn is_property_initializer_compatible(&self, prop: &PropertyInfo) -> bool {
        if !prop.has_public_setter_or_init || !self.is_shape_snapshot_compatible(prop) {
            return false;
        }
        match self.pool.user_class(prop.shape) {
            Some(class) => self.graph.get(class).is_some_and(|info| {
                info.constructor
                    .as_ref()
                    .is_some_and(|ctor| ctor.accepts_initializer && ctor.is_parameterless)
            }),
            None => true,
        }
    }

    /// Class-level initializer compatibility.
    pub fn is_initializer_compatible(&self, class: &ClassInfo) -> bool {
        !class.is_static
            && class.has_public_constructor()
            && class
                .settable_properties()
                .all(|(_, prop)| self.is_property_initializer_compatible(prop))
    }

    pub fn classify_all(&self) -> Classification {
        let mut classes = Vec::with_capacity(self.graph.len());
        let mut properties = Vec::with_capacity(self.graph.len());

        for class in self.graph {
            let props: Vec<PropertyCompat> = class
                .properties
                .iter()
                .map(|prop| {
                    let compat = PropertyCompat {
                        snapshot: self.is_property_snapshot_compatible(prop),
                        initializer: self.is_property_initializer_compatible(prop),
                    };
                    tracing::trace!(
                        class = %class.qualified_name,
                        property = %prop.name,
                        shape = %self.pool.format_shape_with(prop.shape, self.graph),
                        snapshot = compat.snapshot,
                        initializer = compat.initializer,
                        "classified property"
                    );
                    compat
                })
                .collect();

            let snapshot = self.is_snapshot_compatible(class.id);
            let initializer = self.is_initializer_compatible(class);
            let accepts_initializer = class.accepts_initializer();
            let member_initializers = match (&class.constructor, initializer) {
                (Some(ctor), true) => ctor
                    .member_initializers
                    .iter()
                    .copied()
                    .filter(|&i| props.get(i).is_some_and(|p| p.initializer))
                    .collect(),
                _ => Vec::new(),
            };

            let compat = ClassCompat {
                snapshot,
                initializer,
                accepts_initializer,
                offers_union: accepts_initializer && initializer,
                member_initializers,
            };
            tracing::debug!(
                class = %class.qualified_name,
                snapshot = compat.snapshot,
                initializer = compat.initializer,
                union = compat.offers_union,
                "classified"
            );

            classes.push(compat);
            properties.push(props);
        }

        Classification {
            classes,
            properties,
        }
    }
}

#[cfg(test)]
mod tests;
