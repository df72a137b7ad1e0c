//! Marshalling plans.
//!
//! A [`Marshal`] tree describes how one value is converted on its way across
//! the boundary, independent of the syntax it is printed in. Plans mirror
//! the wrapper nesting of their shape: the outer container transform wraps
//! the inner one, and a wrapper over an identity plan is itself the identity.
//!
//! Printing lives in [`print`].

pub mod print;

pub use print::{print_plan, HostSyntax, MarshalSyntax, TsSyntax};

use tether_types::{ClassId, ShapeData, ShapeFlags, ShapeId, ShapePool};

/// Direction a value travels, seen from the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Client-typed value entering the boundary: parameters and setters.
    IntoBoundary,
    /// Boundary value leaving toward the typed side: returns and getters.
    OutOfBoundary,
}

impl Flow {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::IntoBoundary => Self::OutOfBoundary,
            Self::OutOfBoundary => Self::IntoBoundary,
        }
    }
}

/// A value conversion plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marshal {
    /// Pass the value through unchanged.
    Identity,
    /// Single character unit to and from its numeric code.
    CharCode(Flow),
    /// Wrap or unwrap an exported-class handle.
    Handle {
        class: ClassId,
        flow: Flow,
        /// The incoming value may be a plain initializer literal instead of
        /// a proxy and must be checked at runtime.
        form_check: bool,
    },
    /// Copy a proxy into its snapshot.
    Materialize(ClassId),
    /// Null guard around the inner plan.
    Guard {
        inner: Box<Marshal>,
        /// The guarded value is a host value type.
        value_type: bool,
    },
    /// Apply the inner plan to each array element.
    Map(Box<Marshal>),
    /// Apply the inner plan to the eventual result.
    Then(Box<Marshal>),
    /// Adapt a callback: parameters flow the other way, the return value
    /// flows the same way.
    Delegate { params: Vec<Marshal>, ret: Box<Marshal> },
}

impl Marshal {
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Whether printing this plan emits a runtime proxy-or-literal check.
    pub fn needs_form_check(&self) -> bool {
        match self {
            Self::Handle { form_check, .. } => *form_check,
            Self::Guard { inner, .. } | Self::Map(inner) | Self::Then(inner) => {
                inner.needs_form_check()
            }
            Self::Delegate { params, ret } => {
                ret.needs_form_check() || params.iter().any(Self::needs_form_check)
            }
            Self::Identity | Self::CharCode(_) | Self::Materialize(_) => false,
        }
    }

    fn lift(inner: Self, wrap: impl FnOnce(Box<Self>) -> Self) -> Self {
        if inner.is_identity() {
            Self::Identity
        } else {
            wrap(Box::new(inner))
        }
    }
}

/// What a plan does at its terminal leaf.
#[derive(Copy, Clone)]
enum Leaf {
    Convert(Flow),
    Materialize,
}

/// Builds plans from shapes.
pub struct MarshalBuilder<'a> {
    pool: &'a ShapePool,
}

impl<'a> MarshalBuilder<'a> {
    pub fn new(pool: &'a ShapePool) -> Self {
        Self { pool }
    }

    /// Plan for a value of `shape` travelling in `flow`.
    pub fn build(&self, shape: ShapeId, flow: Flow) -> Marshal {
        if !self.pool.flags(shape).needs_conversion() {
            return Marshal::Identity;
        }
        self.compose(shape, Leaf::Convert(flow))
    }

    /// Plan copying a proxy-typed value of `shape` into its snapshot form.
    pub fn materialize(&self, shape: ShapeId) -> Marshal {
        if !self.pool.flags(shape).has_user_class() {
            return Marshal::Identity;
        }
        self.compose(shape, Leaf::Materialize)
    }

    fn compose(&self, shape: ShapeId, leaf: Leaf) -> Marshal {
        match self.pool.get(shape) {
            ShapeData::Array(elem) => Marshal::lift(self.compose(*elem, leaf), Marshal::Map),
            ShapeData::Nullable(inner) => {
                let value_type = self.pool.flags(*inner).contains(ShapeFlags::IS_VALUE_TYPE);
                Marshal::lift(self.compose(*inner, leaf), |inner| Marshal::Guard {
                    inner,
                    value_type,
                })
            }
            ShapeData::AsyncResult(Some(inner)) => {
                Marshal::lift(self.compose(*inner, leaf), Marshal::Then)
            }
            ShapeData::AsyncResult(None) => Marshal::Identity,
            data => match leaf {
                Leaf::Convert(flow) => self.convert_leaf(shape, data, flow),
                Leaf::Materialize => match data {
                    ShapeData::UserExported(class) => Marshal::Materialize(*class),
                    _ => Marshal::Identity,
                },
            },
        }
    }

    fn convert_leaf(&self, shape: ShapeId, data: &ShapeData, flow: Flow) -> Marshal {
        match data {
            ShapeData::CharacterUnit => Marshal::CharCode(flow),
            ShapeData::UserExported(class) => {
                let form_check = flow == Flow::IntoBoundary
                    && self.pool.flags(shape).supports_client_construction();
                Marshal::Handle {
                    class: *class,
                    flow,
                    form_check,
                }
            }
            ShapeData::Delegate { params, ret } => {
                let params: Vec<_> = params
                    .iter()
                    .map(|&p| self.build(p, flow.reversed()))
                    .collect();
                let ret = self.build(*ret, flow);
                if ret.is_identity() && params.iter().all(Marshal::is_identity) {
                    Marshal::Identity
                } else {
                    Marshal::Delegate {
                        params,
                        ret: Box::new(ret),
                    }
                }
            }
            _ => Marshal::Identity,
        }
    }
}
