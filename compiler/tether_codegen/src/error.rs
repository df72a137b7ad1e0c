//! Rendering errors.

use thiserror::Error;

/// Errors raised while rendering either artifact.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The graph, classification and pool disagree. Always a generator bug
    /// or an inconsistent input bundle; generation stops.
    #[error("internal consistency error: {0}")]
    Internal(String),

    /// Two exports map to the same name in the module export map.
    #[error("export `{path}` is produced by both {first} and {second}")]
    ExportCollision {
        path: String,
        first: String,
        second: String,
    },
}

impl CodegenError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
