//! Tether pipeline driver.
//!
//! Runs the whole generator over a set of class declarations:
//!
//! ```text
//! [ClassDecl] → build_graph → classify → mark flags → ExportMap
//!                                                      ↓
//!                                  render_boundary + render_client
//! ```
//!
//! The `tether` binary is a thin shell over [`load_decls`], [`generate`] and
//! [`Artifacts::write_to`].

mod error;
mod options;
mod tracing_config;

use std::path::{Path, PathBuf};

use tether_codegen::{render_boundary, render_client, ExportMap, Model};
use tether_graph::{build_graph, classify, ClassDecl};
use tether_types::ShapePool;

pub use error::GenerateError;
pub use options::GenerateOptions;
pub use tracing_config::init_tracing;

/// The two generated sources of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    /// Host-side boundary shim.
    pub boundary: String,
    /// TypeScript client module.
    pub client: String,
}

impl Artifacts {
    /// Write both artifacts into `dir`, creating it if needed.
    ///
    /// Returns the written paths, boundary first.
    pub fn write_to(
        &self,
        dir: &Path,
        options: &GenerateOptions,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        std::fs::create_dir_all(dir).map_err(|source| GenerateError::io(dir, source))?;
        let files = [
            (options.boundary_file_name(), &self.boundary),
            (options.client_file_name(), &self.client),
        ];
        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = dir.join(name);
            std::fs::write(&path, contents).map_err(|source| GenerateError::io(&path, source))?;
            tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

/// Run the generator over `decls`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(classes = decls.len(), module = %options.module_name)
)]
pub fn generate(
    decls: &[ClassDecl],
    options: &GenerateOptions,
) -> Result<Artifacts, GenerateError> {
    let mut pool = ShapePool::new();
    let graph = build_graph(decls, &mut pool, &options.build_options())?;
    let compat = classify(&graph, &pool);
    pool.mark_client_constructible(compat.union_classes());

    let model = Model::new(&graph, &pool, &compat);
    let naming = options.naming();
    let exports = ExportMap::build(model, &naming)?;
    let render = options.render_options();
    let boundary = render_boundary(model, &naming, &exports, &render)?;
    let client = render_client(model, &naming, &exports, &render)?;

    tracing::debug!(
        shapes = pool.len(),
        boundary_bytes = boundary.len(),
        client_bytes = client.len(),
        "generation finished"
    );
    Ok(Artifacts { boundary, client })
}

/// Read a JSON array of class declarations.
pub fn load_decls(path: &Path) -> Result<Vec<ClassDecl>, GenerateError> {
    let text = std::fs::read_to_string(path).map_err(|source| GenerateError::io(path, source))?;
    serde_json::from_str(&text).map_err(|source| GenerateError::json(path, source))
}

/// Read a JSON config file; absent keys keep their defaults.
pub fn load_options(path: &Path) -> Result<GenerateOptions, GenerateError> {
    let text = std::fs::read_to_string(path).map_err(|source| GenerateError::io(path, source))?;
    serde_json::from_str(&text).map_err(|source| GenerateError::json(path, source))
}
