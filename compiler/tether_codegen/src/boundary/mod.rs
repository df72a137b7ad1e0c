//! Boundary-layer backend: the host-side interop shim.
//!
//! One static `<Class>Interop` class per exported class, grouped by
//! namespace, with one entry point per [`ExportedFunction`]. Every signature
//! is rendered in the boundary layer, so exported classes appear only as
//! opaque handles; bodies cast the handle back to the host class and run
//! the same marshal plans the client uses, in the host's direction.

use tether_graph::{ClassInfo, PropertyInfo};
use tether_types::ShapeId;

use crate::export_map::{
    BoundaryType, ExportMap, ExportNode, ExportedClass, ExportedFunction, FunctionKind,
};
use crate::marshal::{print_plan, Flow, HostSyntax, MarshalBuilder};
use crate::template::{RenderContext, TemplateEngine};
use crate::{CodeWriter, CodegenError, Dialect, Layer, Model, NamingPolicy, RenderOptions};

/// Render the boundary artifact.
#[tracing::instrument(level = "debug", skip_all, fields(module = %options.module_name))]
pub fn render_boundary(
    model: Model<'_>,
    naming: &NamingPolicy,
    exports: &ExportMap,
    options: &RenderOptions,
) -> Result<String, CodegenError> {
    let dialect = Dialect::host();
    let mut renderer = BoundaryRenderer {
        model,
        naming,
        options,
        engine: TemplateEngine::new(model, naming, &dialect, Layer::Boundary),
        marshal: MarshalBuilder::new(model.pool),
        w: CodeWriter::new(options.indent_width),
    };
    renderer.emit_header();
    let mut path = Vec::new();
    renderer.emit_node(exports.root(), &mut path)?;
    Ok(renderer.w.take_output())
}

struct BoundaryRenderer<'a> {
    model: Model<'a>,
    naming: &'a NamingPolicy,
    options: &'a RenderOptions,
    engine: TemplateEngine<'a>,
    marshal: MarshalBuilder<'a>,
    w: CodeWriter,
}

impl BoundaryRenderer<'_> {
    fn emit_header(&mut self) {
        self.w.writeln("// <auto-generated/>");
        self.w.writeln(&format!(
            "// Boundary layer of the {} module.",
            self.options.module_name
        ));
        self.w.writeln("#nullable enable");
        self.w.newline();
        self.w.writeln("using System;");
        self.w.writeln("using System.Runtime.InteropServices.JavaScript;");
        self.w.writeln("using System.Threading.Tasks;");
    }

    /// Classes of this node inside one namespace block, then each child
    /// namespace in turn.
    fn emit_node(
        &mut self,
        node: &ExportNode,
        path: &mut Vec<String>,
    ) -> Result<(), CodegenError> {
        if !node.classes.is_empty() {
            self.w.newline();
            let in_namespace = !path.is_empty();
            if in_namespace {
                self.w.open_block(&format!("namespace {}", path.join(".")));
            }
            for (i, class) in node.classes.values().enumerate() {
                if i > 0 {
                    self.w.newline();
                }
                self.emit_class(class)?;
            }
            if in_namespace {
                self.w.close_block("");
            }
        }
        for (segment, child) in &node.namespaces {
            path.push(segment.clone());
            self.emit_node(child, path)?;
            path.pop();
        }
        Ok(())
    }

    fn emit_class(&mut self, exported: &ExportedClass) -> Result<(), CodegenError> {
        let class = self.model.class(exported.class)?;
        tracing::trace!(
            class = %class.qualified_name,
            functions = exported.functions.len(),
            "boundary class"
        );

        self.emit_doc(class.doc.as_deref());
        self.w.open_block(&format!("public static partial class {}", exported.interop_name));
        for (i, function) in exported.functions.iter().enumerate() {
            if i > 0 {
                self.w.newline();
            }
            self.emit_function(class, function)?;
        }
        self.w.close_block("");
        Ok(())
    }

    fn emit_function(
        &mut self,
        class: &ClassInfo,
        function: &ExportedFunction,
    ) -> Result<(), CodegenError> {
        let doc = match function.kind {
            FunctionKind::Getter(i) | FunctionKind::Setter(i) => {
                class.properties.get(i).and_then(|p| p.doc.as_deref())
            }
            FunctionKind::Method(i) => class.methods.get(i).and_then(|m| m.doc.as_deref()),
            FunctionKind::Constructor => None,
        };
        self.emit_doc(doc);
        if let Some(attribute) = &self.options.export_attribute {
            self.w.writeln(&format!("[{attribute}]"));
        }

        let params = function
            .params
            .iter()
            .map(|(name, ty)| -> Result<String, CodegenError> {
                Ok(format!("{} {name}", self.type_name(*ty)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.w.open_block(&format!(
            "public static {} {}({})",
            self.type_name(function.returns)?,
            function.name,
            params.join(", ")
        ));
        match function.kind {
            FunctionKind::Constructor => self.emit_constructor_body(class, function)?,
            FunctionKind::Getter(i) => {
                let property = property(class, i)?;
                let read = format!("{}.{}", self.receiver(class), property.name);
                self.emit_return(&read, property.shape)?;
            }
            FunctionKind::Setter(i) => {
                let property = property(class, i)?;
                let value = self.convert_in("value", property.shape)?;
                self.w.writeln(&format!(
                    "{}.{} = {value};",
                    self.receiver(class),
                    property.name
                ));
            }
            FunctionKind::Method(i) => {
                let method = class.methods.get(i).ok_or_else(|| {
                    CodegenError::internal(format!(
                        "method {i} out of range for `{}`",
                        class.qualified_name
                    ))
                })?;
                let args = self.declared_args(function, method.params.iter().map(|p| p.shape))?;
                let call = format!(
                    "{}.{}({})",
                    self.receiver(class),
                    method.name,
                    args.join(", ")
                );
                if method.returns == ShapeId::VOID {
                    self.w.writeln(&format!("{call};"));
                } else {
                    self.emit_return(&call, method.returns)?;
                }
            }
        }
        self.w.close_block("");
        Ok(())
    }

    /// `new Q(args) { P = init_P, .. }`: declared parameters come first,
    /// member initializers fill the rest of the parameter list.
    fn emit_constructor_body(
        &mut self,
        class: &ClassInfo,
        function: &ExportedFunction,
    ) -> Result<(), CodegenError> {
        let ctor = class.constructor.as_ref().ok_or_else(|| {
            CodegenError::internal(format!("`{}` has no constructor", class.qualified_name))
        })?;
        let declared = ctor.params.len();
        let args = self.declared_args(function, ctor.params.iter().map(|p| p.shape))?;

        let members = self.model.compat.member_initializers(class.id);
        let inits = function
            .params
            .iter()
            .skip(declared)
            .zip(members)
            .map(|((name, _), &index)| -> Result<String, CodegenError> {
                let property = property(class, index)?;
                Ok(format!(
                    "{} = {}",
                    property.name,
                    self.convert_in(name, property.shape)?
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let construct = format!("new {}({})", class.qualified_name, args.join(", "));
        if inits.is_empty() {
            self.w.writeln(&format!("return {construct};"));
        } else {
            self.w.writeln(&format!("return {construct} {{ {} }};", inits.join(", ")));
        }
        Ok(())
    }

    /// Converted arguments for the declared parameters of a call, skipping
    /// the receiver.
    fn declared_args(
        &self,
        function: &ExportedFunction,
        shapes: impl Iterator<Item = ShapeId>,
    ) -> Result<Vec<String>, CodegenError> {
        function
            .params
            .iter()
            .filter(|(_, ty)| *ty != BoundaryType::Handle)
            .zip(shapes)
            .map(|((name, _), shape)| self.convert_in(name, shape))
            .collect()
    }

    fn emit_return(&mut self, expr: &str, shape: ShapeId) -> Result<(), CodegenError> {
        let plan = self.marshal.build(shape, Flow::OutOfBoundary);
        if plan.is_identity() {
            self.w.writeln(&format!("return {expr};"));
        } else {
            let converted = print_plan(&plan, "res", &HostSyntax, self.model)?;
            self.w.writeln(&format!("var res = {expr};"));
            self.w.writeln(&format!("return {converted};"));
        }
        Ok(())
    }

    fn convert_in(&self, value: &str, shape: ShapeId) -> Result<String, CodegenError> {
        let plan = self.marshal.build(shape, Flow::IntoBoundary);
        print_plan(&plan, value, &HostSyntax, self.model)
    }

    fn receiver(&self, class: &ClassInfo) -> String {
        if class.is_static {
            class.qualified_name.clone()
        } else {
            format!("(({}){})", class.qualified_name, self.naming.handle_field)
        }
    }

    fn type_name(&self, ty: BoundaryType) -> Result<String, CodegenError> {
        match ty {
            BoundaryType::Handle => Ok(self.engine.dialect().handle.clone()),
            BoundaryType::Shape(shape) => self.engine.render(shape, RenderContext::Proxy),
        }
    }

    fn emit_doc(&mut self, doc: Option<&str>) {
        let Some(doc) = doc.filter(|d| self.options.emit_docs && !d.trim().is_empty()) else {
            return;
        };
        self.w.writeln("/// <summary>");
        for line in doc.lines() {
            let escaped = line
                .trim_end()
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;");
            let line = format!("/// {escaped}");
            self.w.writeln(line.trim_end());
        }
        self.w.writeln("/// </summary>");
    }
}

fn property(class: &ClassInfo, index: usize) -> Result<&PropertyInfo, CodegenError> {
    class.properties.get(index).ok_or_else(|| {
        CodegenError::internal(format!(
            "property {index} out of range for `{}`",
            class.qualified_name
        ))
    })
}
