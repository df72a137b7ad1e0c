//! Generator configuration.

use serde::Deserialize;
use tether_codegen::{NamingPolicy, RenderOptions};
use tether_graph::BuildOptions;

/// Options of one generator run, loadable from a JSON config file.
///
/// Every key is optional:
///
/// ```json
/// { "module_name": "Shop", "export_attribute": null, "indent_width": 2 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
    /// Names both output files and appears in their headers.
    pub module_name: String,
    /// Client-side name of the opaque handle type.
    pub handle_type: String,
    /// Appended to a class name to name its boundary class.
    pub interop_suffix: String,
    /// `null` drops the attribute from boundary functions.
    pub export_attribute: Option<String>,
    /// Host type names that fail generation on top of the built-in set.
    pub extra_unsupported: Vec<String>,
    pub emit_docs: bool,
    pub indent_width: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            module_name: render.module_name,
            handle_type: render.handle_type,
            interop_suffix: NamingPolicy::default().interop_suffix,
            export_attribute: render.export_attribute,
            extra_unsupported: Vec::new(),
            emit_docs: render.emit_docs,
            indent_width: render.indent_width,
        }
    }
}

impl GenerateOptions {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            extra_unsupported: self.extra_unsupported.clone(),
        }
    }

    pub fn naming(&self) -> NamingPolicy {
        NamingPolicy {
            interop_suffix: self.interop_suffix.clone(),
            ..NamingPolicy::default()
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            module_name: self.module_name.clone(),
            handle_type: self.handle_type.clone(),
            export_attribute: self.export_attribute.clone(),
            emit_docs: self.emit_docs,
            indent_width: self.indent_width,
        }
    }

    /// `Interop.Interop.cs` by default.
    pub fn boundary_file_name(&self) -> String {
        format!("{}.Interop.cs", self.module_name)
    }

    /// `Interop.ts` by default.
    pub fn client_file_name(&self) -> String {
        format!("{}.ts", self.module_name)
    }
}
