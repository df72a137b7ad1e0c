//! Client-layer backend: the TypeScript module.
//!
//! Output order:
//!
//! 1. the runtime prelude (`ManagedObject`, `initialize`, `ProxyBase`) and
//!    the `AssemblyExports` interface, see [`prelude`];
//! 2. per exported class, grouped in nested `export namespace` blocks that
//!    mirror the host namespaces, a proxy class merged with a namespace
//!    holding its `Initializer`, `Snapshot` and `materialize`, see [`proxy`].
//!
//! Proxy members call the boundary through the same export paths the
//! boundary backend declares.

mod prelude;
mod proxy;

use tether_graph::ClassInfo;
use tether_types::ShapeId;

use crate::export_map::{ExportMap, ExportNode};
use crate::marshal::{print_plan, Flow, MarshalBuilder, TsSyntax};
use crate::template::{RenderContext, TemplateEngine};
use crate::{CodeWriter, CodegenError, Dialect, Layer, Model, NamingPolicy, RenderOptions};

/// Render the client artifact.
#[tracing::instrument(level = "debug", skip_all, fields(module = %options.module_name))]
pub fn render_client(
    model: Model<'_>,
    naming: &NamingPolicy,
    exports: &ExportMap,
    options: &RenderOptions,
) -> Result<String, CodegenError> {
    let dialect = Dialect::typescript().with_handle(options.handle_type.as_str());
    let mut renderer = ClientRenderer {
        model,
        naming,
        options,
        exports,
        names: TemplateEngine::new(model, naming, &dialect, Layer::Client),
        boundary_names: TemplateEngine::new(model, naming, &dialect, Layer::Boundary),
        marshal: MarshalBuilder::new(model.pool),
        syntax: TsSyntax {
            handle_field: &naming.handle_field,
        },
        w: CodeWriter::new(options.indent_width),
    };
    renderer.emit_prelude()?;
    renderer.emit_node(exports.root(), true)?;
    Ok(renderer.w.take_output())
}

struct ClientRenderer<'a> {
    model: Model<'a>,
    naming: &'a NamingPolicy,
    options: &'a RenderOptions,
    exports: &'a ExportMap,
    /// Client-layer names: proxies, snapshots, initializers.
    names: TemplateEngine<'a>,
    /// Boundary-layer names, for the export interface.
    boundary_names: TemplateEngine<'a>,
    marshal: MarshalBuilder<'a>,
    syntax: TsSyntax<'a>,
    w: CodeWriter,
}

impl ClientRenderer<'_> {
    /// Classes of a namespace level, then its child namespaces as nested
    /// `export namespace` blocks.
    fn emit_node(&mut self, node: &ExportNode, top_level: bool) -> Result<(), CodegenError> {
        let mut first = !top_level;
        for exported in node.classes.values() {
            let class = self.model.class(exported.class)?;
            self.separate(&mut first);
            self.emit_class(class)?;
        }
        for (segment, child) in &node.namespaces {
            self.separate(&mut first);
            self.w.open_block(&format!("export namespace {segment}"));
            self.emit_node(child, false)?;
            self.w.close_block("");
        }
        Ok(())
    }

    /// A blank line before every item of a block but the first.
    fn separate(&mut self, first: &mut bool) {
        if !std::mem::take(first) {
            self.w.newline();
        }
    }

    fn name(&self, shape: ShapeId, ctx: RenderContext) -> Result<String, CodegenError> {
        self.names.render(shape, ctx)
    }

    /// `exportsOf().Acme.PersonInterop`.
    fn exports_of(&self, class: &ClassInfo) -> String {
        format!("exportsOf().{}", self.naming.export_path_string(class))
    }

    fn convert(&self, value: &str, shape: ShapeId, flow: Flow) -> Result<String, CodegenError> {
        let plan = self.marshal.build(shape, flow);
        print_plan(&plan, value, &self.syntax, self.model)
    }

    /// `return call;`, or bind to `res` and convert when the shape needs it.
    fn emit_return(&mut self, call: &str, shape: ShapeId) -> Result<(), CodegenError> {
        let plan = self.marshal.build(shape, Flow::OutOfBoundary);
        if plan.is_identity() {
            self.w.writeln(&format!("return {call};"));
        } else {
            let converted = print_plan(&plan, "res", &self.syntax, self.model)?;
            self.w.writeln(&format!("const res = {call};"));
            self.w.writeln(&format!("return {converted};"));
        }
        Ok(())
    }

    fn emit_doc(&mut self, doc: Option<&str>) {
        let Some(doc) = doc.filter(|d| self.options.emit_docs && !d.trim().is_empty()) else {
            return;
        };
        let lines: Vec<String> = doc
            .lines()
            .map(|line| line.trim_end().replace("*/", "*\\/"))
            .collect();
        if let [line] = lines.as_slice() {
            self.w.writeln(&format!("/** {line} */"));
            return;
        }
        self.w.writeln("/**");
        for line in &lines {
            let line = format!(" * {line}");
            self.w.writeln(line.trim_end());
        }
        self.w.writeln(" */");
    }
}
