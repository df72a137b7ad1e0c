//! Runtime prelude and the `AssemblyExports` interface.

use crate::export_map::{BoundaryType, ExportNode, ExportedFunction};
use crate::template::RenderContext;
use crate::CodegenError;

use super::ClientRenderer;

impl ClientRenderer<'_> {
    pub(super) fn emit_prelude(&mut self) -> Result<(), CodegenError> {
        let (options, naming) = (self.options, self.naming);
        let module = &options.module_name;
        let handle = self.boundary_names.dialect().handle.clone();
        let field = &naming.handle_field;

        self.w.writeln("// <auto-generated/>");
        self.w.writeln(&format!("// Client layer of the {module} module."));
        self.w.newline();
        self.w.writeln(&format!("export type {handle} = object;"));

        self.w.newline();
        self.w.open_block("export interface AssemblyExports");
        let exports = self.exports;
        self.emit_export_node(exports.root())?;
        self.w.close_block("");

        self.w.newline();
        self.w.writeln("let exportsRef: AssemblyExports | undefined;");
        self.w.newline();
        self.w.writeln("/** Binds this module to the loaded boundary exports. */");
        self.w.open_block("export function initialize(exports: AssemblyExports): void");
        self.w.writeln("exportsRef = exports;");
        self.w.close_block("");
        self.w.newline();
        self.w.open_block("function exportsOf(): AssemblyExports");
        self.w.open_block("if (exportsRef === undefined)");
        self.w.writeln(&format!(
            "throw new Error(\"{module}: initialize() has not been called\");"
        ));
        self.w.close_block("");
        self.w.writeln("return exportsRef;");
        self.w.close_block("");

        self.w.newline();
        self.w.writeln("/** UTF-16 code of a one-unit string; the host expects exactly one char. */");
        self.w.open_block("function charCodeOf(value: string): number");
        self.w.open_block("if (value.length !== 1)");
        self.w.writeln(&format!(
            "throw new RangeError(\"{module}: expected a single character, got \" + JSON.stringify(value));"
        ));
        self.w.close_block("");
        self.w.writeln("return value.charCodeAt(0);");
        self.w.close_block("");

        self.w.newline();
        self.w.writeln("/** Base of every proxy: holds the host object's handle. */");
        self.w.open_block("export abstract class ProxyBase");
        self.w.writeln(&format!("readonly {field}: {handle};"));
        self.w.newline();
        self.w.open_block(&format!("protected constructor({field}: {handle})"));
        self.w.writeln(&format!("this.{field} = {field};"));
        self.w.close_block("");
        self.w.newline();
        self.w.writeln("/** Wraps a handle returned by the boundary without constructing anew. */");
        self.w.open_block(&format!(
            "static fromHandle<T extends ProxyBase>(ctor: {{ prototype: T }}, handle: {handle}): T"
        ));
        self.w.writeln("const proxy = Object.create(ctor.prototype) as T;");
        self.w.writeln(&format!(
            "(proxy as {{ {field}: {handle} }}).{field} = handle;"
        ));
        self.w.writeln("return proxy;");
        self.w.close_block("");
        self.w.close_block("");
        Ok(())
    }

    /// One nested type literal per namespace level, keyed like the export
    /// map.
    fn emit_export_node(&mut self, node: &ExportNode) -> Result<(), CodegenError> {
        for (segment, child) in &node.namespaces {
            self.w.open_block(&format!("{segment}:"));
            self.emit_export_node(child)?;
            self.w.close_block(";");
        }
        for (name, class) in &node.classes {
            self.w.open_block(&format!("{name}:"));
            for function in &class.functions {
                let signature = self.export_signature(function)?;
                self.w.writeln(&signature);
            }
            self.w.close_block(";");
        }
        Ok(())
    }

    /// `get_Name(instance: ManagedObject): string;`
    fn export_signature(&self, function: &ExportedFunction) -> Result<String, CodegenError> {
        let params = function
            .params
            .iter()
            .map(|(name, ty)| -> Result<String, CodegenError> {
                Ok(format!("{name}: {}", self.boundary_type(*ty)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!(
            "{}({}): {};",
            function.name,
            params.join(", "),
            self.boundary_type(function.returns)?
        ))
    }

    fn boundary_type(&self, ty: BoundaryType) -> Result<String, CodegenError> {
        match ty {
            BoundaryType::Handle => Ok(self.boundary_names.dialect().handle.clone()),
            BoundaryType::Shape(shape) => self.boundary_names.render(shape, RenderContext::Proxy),
        }
    }
}
