//! The module export map.
//!
//! One nested lookup, keyed by namespace segment and then by interop class
//! name, listing every boundary function. The boundary backend prints it as
//! host classes; the client backend prints it as the `AssemblyExports`
//! interface and resolves calls through it. Both read the same list, so a
//! function exists on one side exactly when it exists on the other.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use tether_graph::ClassInfo;
use tether_types::{ClassId, ShapeId};

use crate::{CodegenError, Model, NamingPolicy};

/// Type of one boundary parameter or return value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    /// The opaque handle of the receiver or of a constructed object.
    Handle,
    /// A value of this shape, rendered in the boundary layer.
    Shape(ShapeId),
}

/// Which member a boundary function exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Constructor,
    /// Index into the class's properties.
    Getter(usize),
    Setter(usize),
    /// Index into the class's methods.
    Method(usize),
}

impl FunctionKind {
    fn describe(self, class: &ClassInfo) -> String {
        let q = &class.qualified_name;
        let property = |i: usize| class.properties.get(i).map_or("?", |p| p.name.as_str());
        match self {
            Self::Constructor => format!("the constructor of `{q}`"),
            Self::Getter(i) => format!("the getter of `{q}.{}`", property(i)),
            Self::Setter(i) => format!("the setter of `{q}.{}`", property(i)),
            Self::Method(i) => format!(
                "method `{q}.{}`",
                class.methods.get(i).map_or("?", |m| m.name.as_str())
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFunction {
    pub name: String,
    pub kind: FunctionKind,
    pub params: Vec<(String, BoundaryType)>,
    pub returns: BoundaryType,
}

/// The boundary class of one exported class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedClass {
    pub class: ClassId,
    pub interop_name: String,
    pub functions: Vec<ExportedFunction>,
}

impl ExportedClass {
    pub fn function_for(&self, kind: FunctionKind) -> Option<&ExportedFunction> {
        self.functions.iter().find(|f| f.kind == kind)
    }
}

/// One namespace level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportNode {
    pub namespaces: BTreeMap<String, ExportNode>,
    pub classes: BTreeMap<String, ExportedClass>,
}

impl ExportNode {
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.classes.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExportMap {
    root: ExportNode,
    paths: FxHashMap<ClassId, Vec<String>>,
}

impl ExportMap {
    /// Collect the boundary functions of every class in the graph.
    ///
    /// Fails with [`CodegenError::ExportCollision`] when two members of a
    /// class produce the same function name, a member of an instance class
    /// is named like the proxy handle field, or a boundary class shares its
    /// name with a sibling namespace.
    #[tracing::instrument(level = "debug", skip_all, fields(classes = model.graph.len()))]
    pub fn build(model: Model<'_>, naming: &NamingPolicy) -> Result<Self, CodegenError> {
        let mut map = Self::default();
        for class in model.graph {
            let exported = export_class(model, naming, class)?;
            map.insert(naming, class, exported)?;
        }
        tracing::debug!(classes = map.paths.len(), "export map built");
        Ok(map)
    }

    fn insert(
        &mut self,
        naming: &NamingPolicy,
        class: &ClassInfo,
        exported: ExportedClass,
    ) -> Result<(), CodegenError> {
        let path = naming.export_path(class);
        let collision = |at: &[String], other: &str| CodegenError::ExportCollision {
            path: at.join("."),
            first: other.to_string(),
            second: format!("the boundary class of `{}`", class.qualified_name),
        };

        let mut node = &mut self.root;
        for (depth, segment) in class.namespace_segments().enumerate() {
            if node.classes.contains_key(segment) {
                return Err(collision(&path[..=depth], "a boundary class"));
            }
            node = node.namespaces.entry(segment.to_string()).or_default();
        }
        if node.namespaces.contains_key(&exported.interop_name) {
            return Err(collision(&path, "a namespace"));
        }
        if node.classes.contains_key(&exported.interop_name) {
            return Err(collision(&path, "another boundary class"));
        }

        node.classes.insert(exported.interop_name.clone(), exported);
        self.paths.insert(class.id, path);
        Ok(())
    }

    pub fn root(&self) -> &ExportNode {
        &self.root
    }

    /// Follow an export path: namespace segments, then the interop class.
    pub fn lookup(&self, path: &[&str]) -> Option<&ExportedClass> {
        let (class, namespaces) = path.split_last()?;
        let mut node = &self.root;
        for segment in namespaces {
            node = node.namespaces.get(*segment)?;
        }
        node.classes.get(*class)
    }

    pub fn lookup_class(&self, id: ClassId) -> Option<&ExportedClass> {
        let path = self.paths.get(&id)?;
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        self.lookup(&segments)
    }

    /// Boundary class for `id`, or an internal error if it was never built.
    pub(crate) fn require(&self, id: ClassId) -> Result<&ExportedClass, CodegenError> {
        self.lookup_class(id)
            .ok_or_else(|| CodegenError::internal(format!("{id} has no boundary class")))
    }
}

fn export_class(
    model: Model<'_>,
    naming: &NamingPolicy,
    class: &ClassInfo,
) -> Result<ExportedClass, CodegenError> {
    let mut functions = Vec::new();
    let receiver = || (naming.handle_field.clone(), BoundaryType::Handle);

    if let Some(ctor) = class.constructor.as_ref().filter(|c| c.is_public) {
        let mut params: Vec<_> = ctor
            .params
            .iter()
            .map(|p| (naming.parameter(&p.name), BoundaryType::Shape(p.shape)))
            .collect();
        for &index in model.compat.member_initializers(class.id) {
            let property = class.properties.get(index).ok_or_else(|| {
                CodegenError::internal(format!(
                    "member initializer {index} out of range for `{}`",
                    class.qualified_name
                ))
            })?;
            params.push((
                naming.member_initializer_param(property),
                BoundaryType::Shape(property.shape),
            ));
        }
        functions.push(ExportedFunction {
            name: naming.constructor().to_string(),
            kind: FunctionKind::Constructor,
            params,
            returns: BoundaryType::Handle,
        });
    }

    for (index, property) in class.properties.iter().enumerate() {
        let receiver_param = (!class.is_static).then(receiver);
        if property.has_public_getter {
            functions.push(ExportedFunction {
                name: naming.getter(property),
                kind: FunctionKind::Getter(index),
                params: receiver_param.clone().into_iter().collect(),
                returns: BoundaryType::Shape(property.shape),
            });
        }
        if property.has_public_setter_or_init {
            let mut params: Vec<_> = receiver_param.into_iter().collect();
            params.push(("value".to_string(), BoundaryType::Shape(property.shape)));
            functions.push(ExportedFunction {
                name: naming.setter(property),
                kind: FunctionKind::Setter(index),
                params,
                returns: BoundaryType::Shape(ShapeId::VOID),
            });
        }
    }

    for (index, method) in class.methods.iter().enumerate() {
        let mut params: Vec<_> = (!class.is_static).then(receiver).into_iter().collect();
        params.extend(
            method
                .params
                .iter()
                .map(|p| (naming.parameter(&p.name), BoundaryType::Shape(p.shape))),
        );
        functions.push(ExportedFunction {
            name: naming.method(&method.name),
            kind: FunctionKind::Method(index),
            params,
            returns: BoundaryType::Shape(method.returns),
        });
    }

    check_handle_field(naming, class)?;
    check_unique(naming, class, &functions)?;
    Ok(ExportedClass {
        class: class.id,
        interop_name: naming.interop_class(class),
        functions,
    })
}

/// Proxies keep the host handle in `handle_field`; a member of the same
/// name would shadow it on the client.
fn check_handle_field(naming: &NamingPolicy, class: &ClassInfo) -> Result<(), CodegenError> {
    if class.is_static {
        return Ok(());
    }
    let field = naming.handle_field.as_str();
    let clash = class
        .properties
        .iter()
        .map(|p| ("property", p.name.as_str()))
        .chain(class.methods.iter().map(|m| ("method", m.name.as_str())))
        .find(|&(_, name)| name == field);
    match clash {
        Some((what, name)) => Err(CodegenError::ExportCollision {
            path: format!("{}.{name}", class.qualified_name),
            first: format!("the `{field}` handle field of every proxy"),
            second: format!("{what} `{}.{name}`", class.qualified_name),
        }),
        None => Ok(()),
    }
}

fn check_unique(
    naming: &NamingPolicy,
    class: &ClassInfo,
    functions: &[ExportedFunction],
) -> Result<(), CodegenError> {
    let mut seen: FxHashMap<&str, FunctionKind> = FxHashMap::default();
    for function in functions {
        if let Some(first) = seen.insert(&function.name, function.kind) {
            return Err(CodegenError::ExportCollision {
                path: format!("{}.{}", naming.export_path_string(class), function.name),
                first: first.describe(class),
                second: function.kind.describe(class),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
