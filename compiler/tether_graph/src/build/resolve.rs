//! Resolution of host type references into pool shapes.
//!
//! Order of precedence for a name: built-in host type, exported class,
//! declared unimplemented type (fatal), anything else (opaque handle).

use rustc_hash::{FxHashMap, FxHashSet};

use tether_types::{ClassId, ShapeId, ShapePool};

use crate::{GraphError, HostTypeRef};

/// Host types that must fail generation instead of degrading to a handle.
pub const DEFAULT_UNSUPPORTED_TYPES: &[&str] = &[
    "System.Span",
    "Span",
    "System.ReadOnlySpan",
    "ReadOnlySpan",
    "System.ArraySegment",
    "ArraySegment",
    "System.IntPtr",
    "IntPtr",
    "nint",
    "System.Decimal",
    "Decimal",
    "decimal",
];

/// Exported class names known to the resolver.
#[derive(Debug, Default)]
pub(crate) struct ClassIndex {
    qualified: FxHashMap<String, ClassId>,
    by_simple_name: FxHashMap<String, Vec<ClassId>>,
    names: Vec<String>,
}

impl ClassIndex {
    /// Register a class. Returns `false` when the qualified name is taken.
    pub(crate) fn insert(&mut self, simple: &str, qualified: &str) -> bool {
        if self.qualified.contains_key(qualified) {
            return false;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "class counts fit in u32"
        )]
        let id = ClassId::from_raw(self.names.len() as u32);
        self.qualified.insert(qualified.to_string(), id);
        self.by_simple_name
            .entry(simple.to_string())
            .or_default()
            .push(id);
        self.names.push(qualified.to_string());
        true
    }

    fn find(&self, name: &str, member: &str) -> Result<Option<ClassId>, GraphError> {
        if let Some(&id) = self.qualified.get(name) {
            return Ok(Some(id));
        }
        if name.contains('.') {
            return Ok(None);
        }
        match self.by_simple_name.get(name).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([id]) => Ok(Some(*id)),
            Some(ids) => {
                let candidates = ids
                    .iter()
                    .map(|id| format!("`{}`", self.names[id.index()]))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(GraphError::AmbiguousClass {
                    name: name.to_string(),
                    member: member.to_string(),
                    candidates,
                })
            }
        }
    }
}

/// Resolves [`HostTypeRef`]s against one pool and class index.
pub(crate) struct TypeResolver<'a> {
    pool: &'a mut ShapePool,
    classes: &'a ClassIndex,
    unsupported: &'a FxHashSet<String>,
}

impl<'a> TypeResolver<'a> {
    pub(crate) fn new(
        pool: &'a mut ShapePool,
        classes: &'a ClassIndex,
        unsupported: &'a FxHashSet<String>,
    ) -> Self {
        Self {
            pool,
            classes,
            unsupported,
        }
    }

    /// Resolve a type reference used by `member` (for error messages).
    pub(crate) fn resolve(&mut self, ty: &HostTypeRef, member: &str) -> Result<ShapeId, GraphError> {
        let shape = self.resolve_ref(ty, member)?;
        tracing::trace!(
            member,
            shape = %self.pool.format_shape_with(shape, self.classes.names.as_slice()),
            "resolved"
        );
        Ok(shape)
    }

    fn resolve_ref(&mut self, ty: &HostTypeRef, member: &str) -> Result<ShapeId, GraphError> {
        match ty {
            HostTypeRef::Named { name } => self.resolve_named(name, member),
            HostTypeRef::Generic { name, args } => self.resolve_generic(ty, name, args, member),
            HostTypeRef::Array { element } => {
                let elem = self.resolve_ref(element, member)?;
                Ok(self.pool.array(elem))
            }
            HostTypeRef::Nullable { inner } => {
                let inner = self.resolve_ref(inner, member)?;
                Ok(self.pool.nullable(inner))
            }
            HostTypeRef::Delegate { params, returns } => {
                let ret = match returns {
                    Some(ret) => self.resolve_ref(ret, member)?,
                    None => ShapeId::VOID,
                };
                self.delegate(ty, params, ret, member)
            }
            HostTypeRef::Unresolved => {
                tracing::debug!(member, "unresolved host type");
                Ok(ShapeId::UNKNOWN)
            }
        }
    }

    fn resolve_named(&mut self, name: &str, member: &str) -> Result<ShapeId, GraphError> {
        if let Some(shape) = builtin(name) {
            return Ok(shape);
        }
        match strip_system(name) {
            "Task" | "Threading.Tasks.Task" => return Ok(self.pool.async_void()),
            "Action" => return Ok(self.pool.delegate(&[], ShapeId::VOID)),
            _ => {}
        }
        if let Some(class) = self.classes.find(name, member)? {
            return Ok(self.pool.user_exported(class));
        }
        self.check_supported(name, name, member)?;
        tracing::debug!(name, member, "host type has no shape mapping; passing as handle");
        Ok(ShapeId::OPAQUE)
    }

    fn resolve_generic(
        &mut self,
        ty: &HostTypeRef,
        name: &str,
        args: &[HostTypeRef],
        member: &str,
    ) -> Result<ShapeId, GraphError> {
        match (strip_system(name), args) {
            ("Task" | "Threading.Tasks.Task", []) => Ok(self.pool.async_void()),
            ("Task" | "Threading.Tasks.Task", [inner]) => {
                let inner = self.resolve_ref(inner, member)?;
                Ok(self.pool.async_result(Some(inner)))
            }
            ("Nullable", [inner]) => {
                let inner = self.resolve_ref(inner, member)?;
                Ok(self.pool.nullable(inner))
            }
            ("Func", []) => Err(GraphError::InvalidDelegate {
                ty: ty.to_string(),
                member: member.to_string(),
                reason: "`Func` needs a return type",
            }),
            ("Func", [params @ .., ret]) => {
                let ret = self.resolve_ref(ret, member)?;
                self.delegate(ty, params, ret, member)
            }
            ("Action", params) => self.delegate(ty, params, ShapeId::VOID, member),
            _ => {
                self.check_supported(name, &ty.to_string(), member)?;
                tracing::debug!(%ty, member, "generic host type has no shape mapping; passing as handle");
                Ok(ShapeId::OPAQUE)
            }
        }
    }

    fn delegate(
        &mut self,
        ty: &HostTypeRef,
        params: &[HostTypeRef],
        ret: ShapeId,
        member: &str,
    ) -> Result<ShapeId, GraphError> {
        let mut shapes = Vec::with_capacity(params.len());
        for param in params {
            let shape = self.resolve_ref(param, member)?;
            if shape == ShapeId::VOID {
                return Err(GraphError::InvalidDelegate {
                    ty: ty.to_string(),
                    member: member.to_string(),
                    reason: "a parameter cannot be void",
                });
            }
            shapes.push(shape);
        }
        Ok(self.pool.delegate(&shapes, ret))
    }

    fn check_supported(&self, head: &str, shown: &str, member: &str) -> Result<(), GraphError> {
        if self.unsupported.contains(head) {
            return Err(GraphError::UnsupportedShape {
                ty: shown.to_string(),
                member: member.to_string(),
            });
        }
        Ok(())
    }
}

fn strip_system(name: &str) -> &str {
    name.strip_prefix("System.").unwrap_or(name)
}

/// Built-in host types with a fixed shape.
fn builtin(name: &str) -> Option<ShapeId> {
    let shape = match strip_system(name) {
        "byte" | "Byte" => ShapeId::BYTE,
        "short" | "Int16" => ShapeId::INT16,
        "int" | "Int32" => ShapeId::INT32,
        "long" | "Int64" => ShapeId::INT64,
        "float" | "Single" => ShapeId::SINGLE,
        "double" | "Double" => ShapeId::DOUBLE,
        "string" | "String" => ShapeId::STRING,
        "bool" | "Boolean" => ShapeId::BOOLEAN,
        "char" | "Char" => ShapeId::CHAR,
        "DateTime" | "DateTimeOffset" => ShapeId::DATE,
        "void" | "Void" => ShapeId::VOID,
        "object" | "Object" => ShapeId::OPAQUE,
        _ => return None,
    };
    Some(shape)
}

#[cfg(test)]
mod tests;
