//! Exported class/member graph for Tether.
//!
//! - [`decl`]: raw declarations from the symbol-discovery step (serde)
//! - [`build_graph`]: resolves declarations into a [`ClassGraph`], interning
//!   every member type into the run's [`ShapePool`](tether_types::ShapePool)
//! - [`classify`]: export-compatibility of classes and properties

pub mod decl;

mod build;
mod classify;
mod error;
mod graph;

pub use build::{build_graph, BuildOptions, DEFAULT_UNSUPPORTED_TYPES};
pub use classify::{
    classify, ClassCompat, Classification, CompatClassifier, PropertyCompat,
};
pub use decl::{
    ClassDecl, ConstructorDecl, HostTypeRef, MethodDecl, ParamDecl, PropertyDecl,
};
pub use error::GraphError;
pub use graph::{
    ClassGraph, ClassInfo, ConstructorInfo, MethodInfo, ParameterInfo, PropertyInfo,
};
