//! Target dialects: the token tables the template engine substitutes into.
//!
//! Wrapper tokens are `{0}` templates; the inner name replaces the
//! placeholder. Leaf tokens are plain names.

use tether_types::PrimitiveKind;

/// Which artifact a name is rendered for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Primitive-safe, handle-based entry points.
    Boundary,
    /// Ergonomic proxy/snapshot/initializer wrappers.
    Client,
}

/// How a dialect spells a callable type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DelegateStyle {
    /// `(arg0: A, arg1: B) => R`
    Arrow,
    /// `Func<A, B, R>` / `Action<A, B>`
    Generic,
}

/// Token table of one target syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    pub array: &'static str,
    pub nullable: &'static str,
    pub deferred: &'static str,
    /// The void-result deferred form.
    pub deferred_void: &'static str,
    /// Opaque handle type, also used for host objects without a mapping.
    pub handle: String,
    pub boolean: &'static str,
    /// Character unit on the boundary: its numeric code.
    pub char_code: &'static str,
    /// Character unit on the client.
    pub char_unit: &'static str,
    pub date: &'static str,
    pub void: &'static str,
    pub unknown: &'static str,
    pub delegate_style: DelegateStyle,
    primitives: [&'static str; 7],
}

/// Placeholder replaced by the inner name.
pub const PLACEHOLDER: &str = "{0}";

impl Dialect {
    /// The host-side shim syntax.
    pub fn host() -> Self {
        Self {
            name: "host",
            array: "{0}[]",
            nullable: "{0}?",
            deferred: "Task<{0}>",
            deferred_void: "Task",
            handle: "object".to_string(),
            boolean: "bool",
            char_code: "int",
            char_unit: "char",
            date: "DateTime",
            void: "void",
            unknown: "object",
            delegate_style: DelegateStyle::Generic,
            primitives: ["byte", "short", "int", "long", "float", "double", "string"],
        }
    }

    /// TypeScript, for the client module and the export map.
    pub fn typescript() -> Self {
        Self {
            name: "typescript",
            array: "Array<{0}>",
            nullable: "{0} | null",
            deferred: "Promise<{0}>",
            deferred_void: "Promise<void>",
            handle: "ManagedObject".to_string(),
            boolean: "boolean",
            char_code: "number",
            char_unit: "string",
            date: "Date",
            void: "void",
            unknown: "unknown",
            delegate_style: DelegateStyle::Arrow,
            primitives: [
                "number", "number", "number", "number", "number", "number", "string",
            ],
        }
    }

    /// Replace the handle type name.
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = handle.into();
        self
    }

    /// Name of a primitive kind.
    pub fn primitive(&self, kind: PrimitiveKind) -> &'static str {
        self.primitives[kind as usize]
    }

    /// Character unit name on a layer.
    pub fn char_name(&self, layer: Layer) -> &'static str {
        match layer {
            Layer::Boundary => self.char_code,
            Layer::Client => self.char_unit,
        }
    }
}

/// Substitute `inner` into a `{0}` template.
pub fn apply(template: &str, inner: &str) -> String {
    template.replace(PLACEHOLDER, inner)
}
