//! Symbol name template engine.
//!
//! Maps a `(shape, context)` pair to a type name in one dialect and layer.
//! Wrappers compose bottom-up by substituting the inner name into the
//! dialect's `{0}` template. A context suffix is only ever resolved at an
//! exported-class leaf, never on a wrapper token.

use tether_types::{ClassId, ShapeData, ShapeId};

use crate::dialect::{apply, DelegateStyle, Dialect, Layer};
use crate::{CodegenError, Model, NamingPolicy};

/// Which client form an exported class renders as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderContext {
    /// The live, handle-backed wrapper.
    Proxy,
    /// The class namespace itself.
    Namespace,
    /// The plain-data copy.
    Snapshot,
    /// The plain-object literal used to construct.
    Initializer,
    /// Either a proxy or an initializer literal.
    ProxyInitializerUnion,
}

impl RenderContext {
    pub const ALL: [Self; 5] = [
        Self::Proxy,
        Self::Namespace,
        Self::Snapshot,
        Self::Initializer,
        Self::ProxyInitializerUnion,
    ];

    /// Context for values flowing the other way, as delegate parameters do.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Proxy => Self::ProxyInitializerUnion,
            Self::ProxyInitializerUnion => Self::Proxy,
            other => other,
        }
    }
}

/// Renders names for one dialect and layer.
pub struct TemplateEngine<'a> {
    model: Model<'a>,
    naming: &'a NamingPolicy,
    dialect: &'a Dialect,
    layer: Layer,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(
        model: Model<'a>,
        naming: &'a NamingPolicy,
        dialect: &'a Dialect,
        layer: Layer,
    ) -> Self {
        Self {
            model,
            naming,
            dialect,
            layer,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    /// Render the name of `shape` in `ctx`.
    pub fn render(&self, shape: ShapeId, ctx: RenderContext) -> Result<String, CodegenError> {
        let pool = self.model.pool;
        let d = self.dialect;
        let name = match pool.get(shape) {
            ShapeData::Primitive(kind) => d.primitive(*kind).to_string(),
            ShapeData::Boolean => d.boolean.to_string(),
            ShapeData::CharacterUnit => d.char_name(self.layer).to_string(),
            ShapeData::DateValue => d.date.to_string(),
            ShapeData::Void => d.void.to_string(),
            ShapeData::Unknown => d.unknown.to_string(),
            ShapeData::OpaqueHostObject => d.handle.clone(),
            ShapeData::Array(elem) => apply(d.array, &self.render(*elem, ctx)?),
            ShapeData::Nullable(inner) => {
                let mut inner_name = self.render(*inner, ctx)?;
                let is_arrow = matches!(pool.get(*inner), ShapeData::Delegate { .. })
                    && d.delegate_style == DelegateStyle::Arrow;
                if is_arrow {
                    inner_name = format!("({inner_name})");
                }
                apply(d.nullable, &inner_name)
            }
            ShapeData::AsyncResult(None) => d.deferred_void.to_string(),
            ShapeData::AsyncResult(Some(inner)) => apply(d.deferred, &self.render(*inner, ctx)?),
            ShapeData::UserExported(class) => self.render_class(*class, ctx)?,
            ShapeData::Delegate { params, ret } => self.render_delegate(params, *ret, ctx)?,
        };
        Ok(name)
    }

    /// An exported-class leaf: the only place a context suffix applies.
    fn render_class(&self, id: ClassId, ctx: RenderContext) -> Result<String, CodegenError> {
        let class = self.model.class(id)?;
        if self.layer == Layer::Boundary {
            return Ok(self.dialect.handle.clone());
        }
        let compat = self.model.compat(id)?;
        let base = &class.qualified_name;

        let name = match ctx {
            RenderContext::Proxy | RenderContext::Namespace => base.clone(),
            RenderContext::Snapshot => {
                if !compat.snapshot {
                    return Err(CodegenError::internal(format!(
                        "snapshot form requested for `{base}`, which is not snapshot-compatible"
                    )));
                }
                self.naming.snapshot_of(base)
            }
            RenderContext::Initializer => {
                if compat.initializer {
                    self.naming.initializer_of(base)
                } else {
                    tracing::trace!(class = %base, "no initializer form; using proxy");
                    base.clone()
                }
            }
            RenderContext::ProxyInitializerUnion => {
                if compat.offers_union {
                    format!("{base} | {}", self.naming.initializer_of(base))
                } else {
                    base.clone()
                }
            }
        };
        Ok(name)
    }

    fn render_delegate(
        &self,
        params: &[ShapeId],
        ret: ShapeId,
        ctx: RenderContext,
    ) -> Result<String, CodegenError> {
        let param_ctx = ctx.flipped();
        let params = params
            .iter()
            .map(|&p| self.render(p, param_ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let ret_name = self.render(ret, ctx)?;

        let name = match self.dialect.delegate_style {
            DelegateStyle::Arrow => {
                let list = params
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("arg{i}: {p}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({list}) => {ret_name}")
            }
            DelegateStyle::Generic if ret == ShapeId::VOID => {
                if params.is_empty() {
                    "Action".to_string()
                } else {
                    format!("Action<{}>", params.join(", "))
                }
            }
            DelegateStyle::Generic => {
                let mut args = params;
                args.push(ret_name);
                format!("Func<{}>", args.join(", "))
            }
        };
        Ok(name)
    }
}
