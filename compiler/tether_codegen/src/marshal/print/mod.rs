//! Printing marshal plans as expressions.
//!
//! The walk is shared; each dialect supplies its tokens through
//! [`MarshalSyntax`]. Lambda variables are numbered by nesting depth
//! (`e0`, `t1`, `a2_0`) so nested transforms never shadow each other;
//! `NamingPolicy::parameter` escapes declared names of the same form.

use crate::{CodegenError, Model};

use super::{Flow, Marshal};

/// Surface syntax of conversion expressions in one dialect.
pub trait MarshalSyntax {
    /// Keyword introducing an immutable local.
    fn local_keyword(&self) -> &'static str;

    /// `converted` if `value` is present, else null.
    fn guard(&self, value: &str, converted: &str) -> String;

    /// How a guarded value is read once known to be present.
    fn guarded_value(&self, value: &str, _value_type: bool) -> String {
        value.to_string()
    }

    /// A null-propagating character conversion, where the dialect has one.
    fn lifted_char(&self, _value: &str, _flow: Flow) -> Option<String> {
        None
    }

    fn map(&self, value: &str, var: &str, body: &str) -> String;

    fn then(&self, value: &str, var: &str, body: &str) -> String;

    /// The settled value inside a continuation over `var`.
    fn awaited(&self, var: &str) -> String {
        var.to_string()
    }

    fn char_code(&self, value: &str, flow: Flow) -> String;

    fn handle(&self, value: &str, class: &str, flow: Flow, form_check: bool) -> String;

    fn materialize(&self, value: &str, class: &str) -> Result<String, CodegenError>;
}

/// TypeScript client syntax.
pub struct TsSyntax<'a> {
    pub handle_field: &'a str,
}

impl MarshalSyntax for TsSyntax<'_> {
    fn local_keyword(&self) -> &'static str {
        "const"
    }

    fn guard(&self, value: &str, converted: &str) -> String {
        format!("{value} != null ? {converted} : null")
    }

    fn map(&self, value: &str, var: &str, body: &str) -> String {
        format!("{value}.map({var} => {body})")
    }

    fn then(&self, value: &str, var: &str, body: &str) -> String {
        format!("{value}.then({var} => {body})")
    }

    fn char_code(&self, value: &str, flow: Flow) -> String {
        match flow {
            Flow::IntoBoundary => format!("charCodeOf({value})"),
            Flow::OutOfBoundary => format!("String.fromCharCode({value})"),
        }
    }

    fn handle(&self, value: &str, class: &str, flow: Flow, form_check: bool) -> String {
        let field = self.handle_field;
        match flow {
            Flow::OutOfBoundary => format!("ProxyBase.fromHandle({class}, {value})"),
            Flow::IntoBoundary if form_check => format!(
                "({value} instanceof {class} ? {value}.{field} : new {class}({value}).{field})"
            ),
            Flow::IntoBoundary => format!("{value}.{field}"),
        }
    }

    fn materialize(&self, value: &str, class: &str) -> Result<String, CodegenError> {
        Ok(format!("{class}.materialize({value})"))
    }
}

/// Host shim syntax. Conversions run in the opposite sense of the client's:
/// a value flowing into the boundary arrives as a handle or code and is
/// turned back into the host type.
pub struct HostSyntax;

impl MarshalSyntax for HostSyntax {
    fn local_keyword(&self) -> &'static str {
        "var"
    }

    fn guard(&self, value: &str, converted: &str) -> String {
        format!("{value} is null ? null : {converted}")
    }

    fn guarded_value(&self, value: &str, value_type: bool) -> String {
        if value_type {
            format!("{value}.Value")
        } else {
            value.to_string()
        }
    }

    fn lifted_char(&self, value: &str, flow: Flow) -> Option<String> {
        Some(match flow {
            Flow::IntoBoundary => format!("(char?){value}"),
            Flow::OutOfBoundary => format!("(int?){value}"),
        })
    }

    fn map(&self, value: &str, var: &str, body: &str) -> String {
        format!("Array.ConvertAll({value}, {var} => {body})")
    }

    fn then(&self, value: &str, var: &str, body: &str) -> String {
        format!("{value}.ContinueWith({var} => {body})")
    }

    fn awaited(&self, var: &str) -> String {
        format!("{var}.Result")
    }

    fn char_code(&self, value: &str, flow: Flow) -> String {
        match flow {
            Flow::IntoBoundary => format!("(char){value}"),
            Flow::OutOfBoundary => format!("(int){value}"),
        }
    }

    fn handle(&self, value: &str, class: &str, flow: Flow, _form_check: bool) -> String {
        match flow {
            Flow::IntoBoundary => format!("({class}){value}"),
            Flow::OutOfBoundary => format!("(object){value}"),
        }
    }

    fn materialize(&self, _value: &str, class: &str) -> Result<String, CodegenError> {
        Err(CodegenError::internal(format!(
            "snapshots of `{class}` exist only on the client"
        )))
    }
}

/// Print `plan` applied to the expression `value`.
pub fn print_plan<S: MarshalSyntax + ?Sized>(
    plan: &Marshal,
    value: &str,
    syntax: &S,
    model: Model<'_>,
) -> Result<String, CodegenError> {
    Printer { syntax, model }.print(plan, value, 0)
}

struct Printer<'s, 'm, S: ?Sized> {
    syntax: &'s S,
    model: Model<'m>,
}

impl<S: MarshalSyntax + ?Sized> Printer<'_, '_, S> {
    fn print(&self, plan: &Marshal, value: &str, depth: usize) -> Result<String, CodegenError> {
        let s = self.syntax;
        let out = match plan {
            Marshal::Identity => value.to_string(),
            Marshal::CharCode(flow) => s.char_code(value, *flow),
            Marshal::Handle {
                class,
                flow,
                form_check,
            } => {
                let class = &self.model.class(*class)?.qualified_name;
                s.handle(value, class, *flow, *form_check)
            }
            Marshal::Materialize(class) => {
                let class = &self.model.class(*class)?.qualified_name;
                s.materialize(value, class)?
            }
            Marshal::Guard { inner, value_type } => {
                if let (true, Marshal::CharCode(flow)) = (*value_type, inner.as_ref()) {
                    if let Some(lifted) = s.lifted_char(value, *flow) {
                        return Ok(lifted);
                    }
                }
                let present = s.guarded_value(value, *value_type);
                s.guard(value, &self.print(inner, &present, depth)?)
            }
            Marshal::Map(inner) => {
                let var = format!("e{depth}");
                s.map(value, &var, &self.print(inner, &var, depth + 1)?)
            }
            Marshal::Then(inner) => {
                let var = format!("t{depth}");
                let settled = s.awaited(&var);
                s.then(value, &var, &self.print(inner, &settled, depth + 1)?)
            }
            Marshal::Delegate { params, ret } => self.print_delegate(params, ret, value, depth)?,
        };
        Ok(out)
    }

    /// `(a0_0, a0_1) => ret(value(p0(a0_0), p1(a0_1)))`, binding the call
    /// result to a local when the return conversion reads it more than once.
    fn print_delegate(
        &self,
        params: &[Marshal],
        ret: &Marshal,
        value: &str,
        depth: usize,
    ) -> Result<String, CodegenError> {
        let vars: Vec<String> = (0..params.len()).map(|i| format!("a{depth}_{i}")).collect();
        let args = params
            .iter()
            .zip(&vars)
            .map(|(plan, var)| self.print(plan, var, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        let call = format!("{value}({})", args.join(", "));
        let header = format!("({})", vars.join(", "));

        let body = if matches!(ret, Marshal::Guard { .. }) || ret.needs_form_check() {
            let local = format!("r{depth}");
            let converted = self.print(ret, &local, depth + 1)?;
            format!(
                "{{ {} {local} = {call}; return {converted}; }}",
                self.syntax.local_keyword()
            )
        } else {
            self.print(ret, &call, depth + 1)?
        };
        Ok(format!("{header} => {body}"))
    }
}
