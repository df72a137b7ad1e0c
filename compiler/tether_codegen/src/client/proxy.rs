//! Proxy classes and their merged namespaces.

use tether_graph::{ClassCompat, ClassInfo, PropertyInfo};
use tether_types::ShapeId;

use crate::export_map::{BoundaryType, ExportedClass, ExportedFunction, FunctionKind};
use crate::marshal::{print_plan, Flow};
use crate::template::RenderContext;
use crate::CodegenError;

use super::ClientRenderer;

impl ClientRenderer<'_> {
    pub(super) fn emit_class(&mut self, class: &ClassInfo) -> Result<(), CodegenError> {
        let compat = self.model.compat(class.id)?;
        let exports = self.exports;
        let exported = exports.require(class.id)?;
        tracing::trace!(
            class = %class.qualified_name,
            snapshot = compat.snapshot,
            initializer = compat.initializer,
            "client class"
        );

        self.emit_doc(class.doc.as_deref());
        let mut first = true;
        if class.is_static {
            self.w.open_block(&format!("export class {}", class.name));
            self.separate(&mut first);
            self.w.writeln("private constructor() {}");
        } else {
            self.w.open_block(&format!("export class {} extends ProxyBase", class.name));
            self.separate(&mut first);
            self.emit_constructor(class, compat, exported)?;
        }

        for (index, property) in class.properties.iter().enumerate() {
            let getter = exported.function_for(FunctionKind::Getter(index));
            let setter = exported.function_for(FunctionKind::Setter(index));
            if getter.is_none() && setter.is_none() {
                continue;
            }
            self.separate(&mut first);
            self.emit_doc(property.doc.as_deref());
            if let Some(getter) = getter {
                self.emit_getter(class, property, getter)?;
            }
            if let Some(setter) = setter {
                if getter.is_some() {
                    self.w.newline();
                }
                self.emit_setter(class, property, setter)?;
            }
        }

        for (index, method) in class.methods.iter().enumerate() {
            let function = exported
                .function_for(FunctionKind::Method(index))
                .ok_or_else(|| missing_export(class, &method.name))?;
            self.separate(&mut first);
            self.emit_doc(method.doc.as_deref());

            let shapes = method.params.iter().map(|p| p.shape);
            let (params, args) = self.call_params(class, function, shapes)?;
            let returns = self.name(method.returns, RenderContext::Proxy)?;
            self.w.open_block(&format!(
                "{}{}({}): {returns}",
                static_prefix(class),
                method.name,
                params.join(", ")
            ));
            let call = format!(
                "{}.{}({})",
                self.exports_of(class),
                function.name,
                args.join(", ")
            );
            if method.returns == ShapeId::VOID {
                self.w.writeln(&format!("{call};"));
            } else {
                self.emit_return(&call, method.returns)?;
            }
            self.w.close_block("");
        }

        self.w.close_block("");
        if !class.is_static {
            self.emit_class_namespace(class, compat)?;
        }
        Ok(())
    }

    /// Public constructors call the boundary `ctor`; a trailing `init`
    /// literal supplies the member initializers. Classes without one get a
    /// private constructor and are only ever wrapped from handles.
    fn emit_constructor(
        &mut self,
        class: &ClassInfo,
        compat: &ClassCompat,
        exported: &ExportedClass,
    ) -> Result<(), CodegenError> {
        let field = self.naming.handle_field.clone();
        let Some(function) = exported.function_for(FunctionKind::Constructor) else {
            let handle = self.names.dialect().handle.clone();
            self.w.open_block(&format!("private constructor({field}: {handle})"));
            self.w.writeln(&format!("super({field});"));
            self.w.close_block("");
            return Ok(());
        };
        let ctor = class.constructor.as_ref().ok_or_else(|| {
            CodegenError::internal(format!("`{}` has no constructor", class.qualified_name))
        })?;

        let declared = ctor.params.len();
        let mut params = Vec::with_capacity(declared + 1);
        let mut args = Vec::with_capacity(function.params.len());
        for ((name, _), param) in function.params.iter().zip(&ctor.params) {
            let ty = self.name(param.shape, RenderContext::ProxyInitializerUnion)?;
            params.push(format!("{name}: {ty}"));
            args.push(self.convert(name, param.shape, Flow::IntoBoundary)?);
        }
        if compat.initializer {
            let optional = if compat.member_initializers.is_empty() { "?" } else { "" };
            params.push(format!(
                "init{optional}: {}",
                self.naming.initializer_of(&class.qualified_name)
            ));
        }
        for &index in &compat.member_initializers {
            let property = property(class, index)?;
            let value = format!("init.{}", property.name);
            args.push(self.convert(&value, property.shape, Flow::IntoBoundary)?);
        }

        self.w.open_block(&format!("constructor({})", params.join(", ")));
        self.w.writeln(&format!(
            "super({}.{}({}));",
            self.exports_of(class),
            function.name,
            args.join(", ")
        ));
        self.w.close_block("");
        Ok(())
    }

    fn emit_getter(
        &mut self,
        class: &ClassInfo,
        property: &PropertyInfo,
        function: &ExportedFunction,
    ) -> Result<(), CodegenError> {
        let ty = self.name(property.shape, RenderContext::Proxy)?;
        self.w.open_block(&format!(
            "{}get {}(): {ty}",
            static_prefix(class),
            property.name
        ));
        let call = format!(
            "{}.{}({})",
            self.exports_of(class),
            function.name,
            self.receiver_args(class).join(", ")
        );
        self.emit_return(&call, property.shape)?;
        self.w.close_block("");
        Ok(())
    }

    fn emit_setter(
        &mut self,
        class: &ClassInfo,
        property: &PropertyInfo,
        function: &ExportedFunction,
    ) -> Result<(), CodegenError> {
        let ty = self.name(property.shape, RenderContext::ProxyInitializerUnion)?;
        self.w.open_block(&format!(
            "{}set {}(value: {ty})",
            static_prefix(class),
            property.name
        ));
        let mut args = self.receiver_args(class);
        args.push(self.convert("value", property.shape, Flow::IntoBoundary)?);
        self.w.writeln(&format!(
            "{}.{}({});",
            self.exports_of(class),
            function.name,
            args.join(", ")
        ));
        self.w.close_block("");
        Ok(())
    }

    /// Typed parameter declarations and the converted boundary arguments of
    /// a method call, receiver first.
    fn call_params(
        &self,
        class: &ClassInfo,
        function: &ExportedFunction,
        shapes: impl Iterator<Item = ShapeId>,
    ) -> Result<(Vec<String>, Vec<String>), CodegenError> {
        let mut params = Vec::new();
        let mut args = self.receiver_args(class);
        let declared = function
            .params
            .iter()
            .filter(|(_, ty)| *ty != BoundaryType::Handle);
        for ((name, _), shape) in declared.zip(shapes) {
            let ty = self.name(shape, RenderContext::ProxyInitializerUnion)?;
            params.push(format!("{name}: {ty}"));
            args.push(self.convert(name, shape, Flow::IntoBoundary)?);
        }
        Ok((params, args))
    }

    fn receiver_args(&self, class: &ClassInfo) -> Vec<String> {
        if class.is_static {
            Vec::new()
        } else {
            vec![format!("this.{}", self.naming.handle_field)]
        }
    }

    /// `export namespace Name { Initializer, Snapshot, materialize }`, or
    /// nothing when the class offers neither form.
    fn emit_class_namespace(
        &mut self,
        class: &ClassInfo,
        compat: &ClassCompat,
    ) -> Result<(), CodegenError> {
        if !compat.initializer && !compat.snapshot {
            return Ok(());
        }
        self.w.newline();
        self.w.open_block(&format!("export namespace {}", class.name));

        if compat.initializer {
            self.w.open_block("export interface Initializer");
            for &index in &compat.member_initializers {
                let property = property(class, index)?;
                let ty = self.name(property.shape, RenderContext::ProxyInitializerUnion)?;
                self.emit_doc(property.doc.as_deref());
                self.w.writeln(&format!("{}: {ty};", property.name));
            }
            self.w.close_block("");
        }

        if compat.snapshot {
            if compat.initializer {
                self.w.newline();
            }
            self.w.open_block("export interface Snapshot");
            for (_, property) in class.readable_properties() {
                let ty = self.name(property.shape, RenderContext::Snapshot)?;
                self.emit_doc(property.doc.as_deref());
                self.w.writeln(&format!("readonly {}: {ty};", property.name));
            }
            self.w.close_block("");
            self.w.newline();
            self.emit_materialize(class)?;
        }

        self.w.close_block("");
        Ok(())
    }

    /// Reads every readable property once, converting nested proxies to
    /// their snapshots.
    fn emit_materialize(&mut self, class: &ClassInfo) -> Result<(), CodegenError> {
        let q = &class.qualified_name;
        self.w.open_block(&format!(
            "export function materialize(proxy: {q}): {}",
            self.naming.snapshot_of(q)
        ));
        self.w.reset_temps();

        let mut fields = Vec::new();
        for (_, property) in class.readable_properties() {
            let read = format!("proxy.{}", property.name);
            let plan = self.marshal.materialize(property.shape);
            let value = if plan.is_identity() {
                read
            } else {
                let local = self.w.fresh_temp("v");
                self.w.writeln(&format!("const {local} = {read};"));
                print_plan(&plan, &local, &self.syntax, self.model)?
            };
            fields.push(format!("{}: {value},", property.name));
        }

        if fields.is_empty() {
            self.w.writeln("return {};");
        } else {
            self.w.open_block("return");
            for field in &fields {
                self.w.writeln(field);
            }
            self.w.close_block(";");
        }
        self.w.close_block("");
        Ok(())
    }
}

fn static_prefix(class: &ClassInfo) -> &'static str {
    if class.is_static {
        "static "
    } else {
        ""
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

fn missing_export(class: &ClassInfo, member: &str) -> CodegenError {
    CodegenError::internal(format!(
        "`{}.{member}` has no boundary function",
        class.qualified_name
    ))
}
