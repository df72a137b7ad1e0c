//! Shape formatting for debugging, tracing and error messages.
//!
//! This is a neutral notation, not either target dialect; the renderers in
//! `tether_codegen` own the real syntax.

use crate::{ClassId, ShapeData, ShapeId};

use super::ShapePool;

/// Resolves class ids to display names.
pub trait ClassNames {
    /// The qualified name of a class, if known.
    fn class_name(&self, class: ClassId) -> Option<&str>;
}

impl ClassNames for () {
    fn class_name(&self, _class: ClassId) -> Option<&str> {
        None
    }
}

impl ClassNames for [String] {
    fn class_name(&self, class: ClassId) -> Option<&str> {
        self.get(class.index()).map(String::as_str)
    }
}

impl ShapePool {
    /// Format a shape, naming classes by id.
    pub fn format_shape(&self, id: ShapeId) -> String {
        self.format_shape_with(id, &())
    }

    /// Format a shape, naming classes through `names`.
    pub fn format_shape_with(&self, id: ShapeId, names: &(impl ClassNames + ?Sized)) -> String {
        let mut buf = String::new();
        self.format_shape_into(id, names, &mut buf);
        buf
    }

    fn format_shape_into(
        &self,
        id: ShapeId,
        names: &(impl ClassNames + ?Sized),
        buf: &mut String,
    ) {
        match self.get(id) {
            ShapeData::Primitive(kind) => buf.push_str(kind.name()),
            ShapeData::Boolean => buf.push_str("bool"),
            ShapeData::CharacterUnit => buf.push_str("char"),
            ShapeData::DateValue => buf.push_str("date"),
            ShapeData::Void => buf.push_str("void"),
            ShapeData::Unknown => buf.push_str("<unknown>"),
            ShapeData::OpaqueHostObject => buf.push_str("<opaque>"),
            ShapeData::Array(elem) => {
                buf.push('[');
                self.format_shape_into(*elem, names, buf);
                buf.push(']');
            }
            ShapeData::Nullable(inner) => {
                self.format_shape_into(*inner, names, buf);
                buf.push('?');
            }
            ShapeData::AsyncResult(None) => buf.push_str("async"),
            ShapeData::AsyncResult(Some(inner)) => {
                buf.push_str("async<");
                self.format_shape_into(*inner, names, buf);
                buf.push('>');
            }
            ShapeData::UserExported(class) => match names.class_name(*class) {
                Some(name) => buf.push_str(name),
                None => buf.push_str(&class.to_string()),
            },
            ShapeData::Delegate { params, ret } => {
                buf.push('(');
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_shape_into(*param, names, buf);
                }
                buf.push_str(") -> ");
                self.format_shape_into(*ret, names, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests;
