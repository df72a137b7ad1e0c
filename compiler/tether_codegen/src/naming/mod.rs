//! Naming policy shared by both renderers.
//!
//! Every name that must agree between the boundary artifact and the client
//! artifact (interop class names, accessor names, export paths, form
//! suffixes, the handle field) comes from here.

use tether_graph::{ClassInfo, PropertyInfo};

/// Names of the generated surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Appended to a class name to name its boundary class.
    pub interop_suffix: String,
    /// Name of the snapshot interface inside a class namespace.
    pub snapshot: String,
    /// Name of the initializer interface inside a class namespace.
    pub initializer: String,
    /// Client field (and boundary parameter) holding the host handle.
    pub handle_field: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            interop_suffix: "Interop".to_string(),
            snapshot: "Snapshot".to_string(),
            initializer: "Initializer".to_string(),
            handle_field: "instance".to_string(),
        }
    }
}

/// Local names the generated bodies use themselves.
const RESERVED_LOCALS: &[&str] = &["res", "value", "init", "proxy"];

/// Numbered locals of the conversion printer and the client writer:
/// `e0`, `t1`, `r0`, `v2` and delegate arguments `a0_1`.
fn is_numbered_local(name: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if let Some(rest) = name.strip_prefix(['e', 't', 'r', 'v']) {
        return digits(rest);
    }
    name.strip_prefix('a')
        .and_then(|rest| rest.split_once('_'))
        .is_some_and(|(depth, index)| digits(depth) && digits(index))
}

impl NamingPolicy {
    /// `PersonInterop` for `Acme.Person`.
    pub fn interop_class(&self, class: &ClassInfo) -> String {
        format!("{}{}", class.name, self.interop_suffix)
    }

    /// Export path of the boundary class: namespace segments, then the
    /// interop class name.
    pub fn export_path(&self, class: &ClassInfo) -> Vec<String> {
        class
            .namespace_segments()
            .map(str::to_string)
            .chain(std::iter::once(self.interop_class(class)))
            .collect()
    }

    /// Dotted form of [`export_path`](Self::export_path).
    pub fn export_path_string(&self, class: &ClassInfo) -> String {
        self.export_path(class).join(".")
    }

    /// Boundary constructor function name.
    pub fn constructor(&self) -> &'static str {
        "ctor"
    }

    /// Boundary getter function name.
    pub fn getter(&self, property: &PropertyInfo) -> String {
        format!("get_{}", property.name)
    }

    /// Boundary setter function name.
    pub fn setter(&self, property: &PropertyInfo) -> String {
        format!("set_{}", property.name)
    }

    /// Boundary method function name.
    pub fn method(&self, name: &str) -> String {
        name.to_string()
    }

    /// Boundary constructor parameter carrying one member initializer.
    pub fn member_initializer_param(&self, property: &PropertyInfo) -> String {
        format!("init_{}", property.name)
    }

    /// A declared parameter name, escaped away from generated locals.
    pub fn parameter(&self, name: &str) -> String {
        if name == self.handle_field
            || RESERVED_LOCALS.contains(&name)
            || is_numbered_local(name)
        {
            format!("{name}_")
        } else {
            name.to_string()
        }
    }

    /// `Acme.Person.Snapshot`.
    pub fn snapshot_of(&self, qualified_name: &str) -> String {
        format!("{qualified_name}.{}", self.snapshot)
    }

    /// `Acme.Person.Initializer`.
    pub fn initializer_of(&self, qualified_name: &str) -> String {
        format!("{qualified_name}.{}", self.initializer)
    }
}
