//! Rendering backends for Tether.
//!
//! # Architecture
//!
//! ```text
//! ClassGraph + ShapePool + Classification   (the Model)
//!        ↓
//!    ExportMap          (one boundary function list per class, via NamingPolicy)
//!        ↓
//!  ┌─────────────┬──────────────┐
//!  │ boundary    │ client       │
//!  │ host shim   │ TS module    │
//!  └─────────────┴──────────────┘
//!        ↑              ↑
//!  TemplateEngine (names)  +  MarshalBuilder / print (bodies)
//! ```
//!
//! Both backends draw every shared name from one [`NamingPolicy`] and walk
//! the same [`ExportMap`], so the two artifacts stay callable against each
//! other.

pub mod boundary;
pub mod client;
pub mod dialect;
pub mod marshal;
pub mod template;

mod error;
mod export_map;
mod naming;
mod writer;

pub use boundary::render_boundary;
pub use client::render_client;
pub use dialect::{Dialect, Layer};
pub use error::CodegenError;
pub use export_map::{
    BoundaryType, ExportMap, ExportNode, ExportedClass, ExportedFunction, FunctionKind,
};
pub use marshal::{Flow, Marshal, MarshalBuilder};
pub use naming::NamingPolicy;
pub use template::{RenderContext, TemplateEngine};
pub use writer::CodeWriter;

use tether_graph::{ClassCompat, ClassGraph, ClassInfo, Classification};
use tether_types::{ClassId, ShapePool};

/// Everything the renderers read: the graph, its shapes, and the
/// classifier's verdicts. Immutable for the whole rendering pass.
#[derive(Copy, Clone)]
pub struct Model<'a> {
    pub graph: &'a ClassGraph,
    pub pool: &'a ShapePool,
    pub compat: &'a Classification,
}

impl<'a> Model<'a> {
    pub fn new(graph: &'a ClassGraph, pool: &'a ShapePool, compat: &'a Classification) -> Self {
        Self {
            graph,
            pool,
            compat,
        }
    }

    /// Look up a class, failing loudly if the bundle is inconsistent.
    pub fn class(&self, id: ClassId) -> Result<&'a ClassInfo, CodegenError> {
        self.graph
            .get(id)
            .ok_or_else(|| CodegenError::internal(format!("{id} is not in the class graph")))
    }

    /// Classifier verdict for a class.
    pub fn compat(&self, id: ClassId) -> Result<&'a ClassCompat, CodegenError> {
        self.compat
            .class(id)
            .ok_or_else(|| CodegenError::internal(format!("{id} was not classified")))
    }
}

/// Rendering knobs shared by both backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Module name, used in headers and runtime error messages.
    pub module_name: String,
    /// Client-side name of the opaque handle type.
    pub handle_type: String,
    /// Attribute placed on every boundary function, if any.
    pub export_attribute: Option<String>,
    /// Copy doc comments into both artifacts.
    pub emit_docs: bool,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_name: "Interop".to_string(),
            handle_type: "ManagedObject".to_string(),
            export_attribute: Some("JSExport".to_string()),
            emit_docs: true,
            indent_width: 4,
        }
    }
}

#[cfg(test)]
mod test_helpers;
