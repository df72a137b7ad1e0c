//! The normalized class/member graph.
//!
//! Built once by [`build_graph`](crate::build_graph) and immutable afterwards.
//! Every member type is already resolved to a [`ShapeId`] in the run's pool.

use rustc_hash::FxHashMap;

use tether_types::{ClassId, ClassNames, ShapeId};

/// One exported class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    /// `namespace.name`, or just `name` in the global namespace.
    pub qualified_name: String,
    pub is_static: bool,
    pub doc: Option<String>,
    pub properties: Vec<PropertyInfo>,
    pub methods: Vec<MethodInfo>,
    /// Always `None` for static classes.
    pub constructor: Option<ConstructorInfo>,
}

impl ClassInfo {
    /// Namespace segments, outermost first. Empty for the global namespace.
    pub fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace.split('.').filter(|s| !s.is_empty())
    }

    /// Whether the class can be built from a plain-object literal.
    pub fn accepts_initializer(&self) -> bool {
        self.constructor
            .as_ref()
            .is_some_and(|ctor| ctor.accepts_initializer)
    }

    /// Whether the class has a publicly callable constructor.
    pub fn has_public_constructor(&self) -> bool {
        self.constructor.as_ref().is_some_and(|ctor| ctor.is_public)
    }

    /// Properties with a public getter, with their indices.
    pub fn readable_properties(&self) -> impl Iterator<Item = (usize, &PropertyInfo)> {
        self.properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_public_getter)
    }

    /// Properties with a public setter or init accessor, with their indices.
    pub fn settable_properties(&self) -> impl Iterator<Item = (usize, &PropertyInfo)> {
        self.properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_public_setter_or_init)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub shape: ShapeId,
    pub has_public_getter: bool,
    pub has_public_setter_or_init: bool,
    pub doc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<ParameterInfo>,
    pub returns: ShapeId,
    pub doc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub shape: ShapeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorInfo {
    pub params: Vec<ParameterInfo>,
    /// Indices into the class's `properties` that are settable, before
    /// classification narrows them to the initializer-compatible ones.
    pub member_initializers: Vec<usize>,
    /// Non-static class with a public parameterless constructor.
    pub accepts_initializer: bool,
    pub is_parameterless: bool,
    pub is_public: bool,
}

/// All exported classes of one run, indexed by [`ClassId`].
#[derive(Clone, Debug, Default)]
pub struct ClassGraph {
    classes: Vec<ClassInfo>,
    by_name: FxHashMap<String, ClassId>,
}

impl ClassGraph {
    pub(crate) fn from_classes(classes: Vec<ClassInfo>) -> Self {
        let by_name = classes
            .iter()
            .map(|class| (class.qualified_name.clone(), class.id))
            .collect();
        Self { classes, by_name }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Get a class by id.
    ///
    /// Returns `None` for ids from another graph.
    #[inline]
    pub fn get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.index())
    }

    /// Look up a class by qualified name.
    pub fn lookup(&self, qualified_name: &str) -> Option<&ClassInfo> {
        self.by_name
            .get(qualified_name)
            .and_then(|&id| self.get(id))
    }

    /// Classes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassInfo> {
        self.classes.iter()
    }
}

impl<'a> IntoIterator for &'a ClassGraph {
    type Item = &'a ClassInfo;
    type IntoIter = std::slice::Iter<'a, ClassInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ClassNames for ClassGraph {
    fn class_name(&self, class: ClassId) -> Option<&str> {
        self.get(class).map(|info| info.qualified_name.as_str())
    }
}
