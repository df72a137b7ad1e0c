//! Graph construction from raw declarations.
//!
//! Two passes: first every class name is registered so members can refer
//! to classes declared later, then members are resolved in declaration
//! order. Shapes are interned into the caller's pool as they are met.

mod resolve;

pub use resolve::DEFAULT_UNSUPPORTED_TYPES;

use rustc_hash::FxHashSet;

use tether_types::{ClassId, ShapePool};

use crate::{
    ClassDecl, ClassGraph, ClassInfo, ConstructorDecl, ConstructorInfo, GraphError, MethodInfo,
    ParamDecl, ParameterInfo, PropertyInfo,
};
use resolve::{ClassIndex, TypeResolver};

/// Knobs for graph construction.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Host type names that fail generation, on top of
    /// [`DEFAULT_UNSUPPORTED_TYPES`].
    pub extra_unsupported: Vec<String>,
}

/// Build the class graph, resolving every member type into `pool`.
#[tracing::instrument(level = "debug", skip_all, fields(classes = decls.len()))]
pub fn build_graph(
    decls: &[ClassDecl],
    pool: &mut ShapePool,
    options: &BuildOptions,
) -> Result<ClassGraph, GraphError> {
    let mut index = ClassIndex::default();
    for decl in decls {
        let qualified = decl.qualified_name();
        if !index.insert(&decl.name, &qualified) {
            return Err(GraphError::DuplicateClass(qualified));
        }
    }

    let unsupported: FxHashSet<String> = DEFAULT_UNSUPPORTED_TYPES
        .iter()
        .map(|s| (*s).to_string())
        .chain(options.extra_unsupported.iter().cloned())
        .collect();

    let mut resolver = TypeResolver::new(pool, &index, &unsupported);
    let mut classes = Vec::with_capacity(decls.len());
    for (raw, decl) in decls.iter().enumerate() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "class counts fit in u32"
        )]
        let id = ClassId::from_raw(raw as u32);
        classes.push(build_class(id, decl, &mut resolver)?);
    }

    Ok(ClassGraph::from_classes(classes))
}

fn build_class(
    id: ClassId,
    decl: &ClassDecl,
    resolver: &mut TypeResolver<'_>,
) -> Result<ClassInfo, GraphError> {
    let qualified_name = decl.qualified_name();
    check_member_names(decl, &qualified_name)?;

    let mut properties = Vec::with_capacity(decl.properties.len());
    for prop in &decl.properties {
        let member = format!("{qualified_name}.{}", prop.name);
        properties.push(PropertyInfo {
            name: prop.name.clone(),
            shape: resolver.resolve(&prop.ty, &member)?,
            has_public_getter: prop.has_public_getter,
            has_public_setter_or_init: prop.has_public_setter_or_init,
            doc: prop.doc.clone(),
        });
    }

    let mut methods = Vec::with_capacity(decl.methods.len());
    for method in &decl.methods {
        let member = format!("{qualified_name}.{}", method.name);
        let params = build_params(&method.params, &member, resolver)?;
        methods.push(MethodInfo {
            name: method.name.clone(),
            params,
            returns: resolver.resolve(&method.returns, &member)?,
            doc: method.doc.clone(),
        });
    }

    let constructor = if decl.is_static {
        if decl.constructor.is_some() {
            tracing::debug!(class = %qualified_name, "ignoring constructor of static class");
        }
        None
    } else {
        let implicit = ConstructorDecl {
            params: Vec::new(),
            is_public: true,
        };
        let ctor = decl.constructor.as_ref().unwrap_or(&implicit);
        let member = format!("{qualified_name}.ctor");
        let params = build_params(&ctor.params, &member, resolver)?;
        let is_parameterless = params.is_empty();
        let member_initializers = properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_public_setter_or_init)
            .map(|(i, _)| i)
            .collect();
        Some(ConstructorInfo {
            params,
            member_initializers,
            accepts_initializer: ctor.is_public && is_parameterless,
            is_parameterless,
            is_public: ctor.is_public,
        })
    };

    tracing::trace!(
        class = %qualified_name,
        properties = properties.len(),
        methods = methods.len(),
        "built class"
    );

    Ok(ClassInfo {
        id,
        name: decl.name.clone(),
        namespace: decl.namespace.clone(),
        qualified_name,
        is_static: decl.is_static,
        doc: decl.doc.clone(),
        properties,
        methods,
        constructor,
    })
}

fn build_params(
    params: &[ParamDecl],
    member: &str,
    resolver: &mut TypeResolver<'_>,
) -> Result<Vec<ParameterInfo>, GraphError> {
    params
        .iter()
        .map(|param| {
            Ok(ParameterInfo {
                name: param.name.clone(),
                shape: resolver.resolve(&param.ty, &format!("{member}({})", param.name))?,
            })
        })
        .collect()
}

/// Properties and methods share one member namespace; overloads are
/// not exportable.
fn check_member_names(decl: &ClassDecl, qualified_name: &str) -> Result<(), GraphError> {
    let mut seen = FxHashSet::default();
    let names = decl
        .properties
        .iter()
        .map(|p| p.name.as_str())
        .chain(decl.methods.iter().map(|m| m.name.as_str()));
    for name in names {
        if !seen.insert(name) {
            return Err(GraphError::DuplicateMember {
                class: qualified_name.to_string(),
                member: name.to_string(),
            });
        }
    }
    Ok(())
}
