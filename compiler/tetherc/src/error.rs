//! Driver errors.

use std::io;
use std::path::{Path, PathBuf};

use tether_codegen::CodegenError;
use tether_graph::GraphError;
use thiserror::Error;

/// Anything that stops a generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
