//! Raw declarations supplied by the symbol-discovery step.
//!
//! These mirror what a host-side analyzer reports about exported classes,
//! before any shape resolution. They deserialize from JSON with lenient
//! defaults so a minimal declaration stays short.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One exported class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// `None` means the host's implicit public parameterless constructor.
    #[serde(default)]
    pub constructor: Option<ConstructorDecl>,
}

impl ClassDecl {
    /// An empty non-static class with the implicit constructor.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_static: false,
            doc: None,
            properties: Vec::new(),
            methods: Vec::new(),
            constructor: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Namespace-qualified name.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// Join a namespace and a simple name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: HostTypeRef,
    #[serde(default = "default_true")]
    pub has_public_getter: bool,
    #[serde(default)]
    pub has_public_setter_or_init: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

impl PropertyDecl {
    /// Property with a public getter and setter.
    pub fn read_write(name: impl Into<String>, ty: HostTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            has_public_getter: true,
            has_public_setter_or_init: true,
            doc: None,
        }
    }

    /// Property with only a public getter.
    pub fn read_only(name: impl Into<String>, ty: HostTypeRef) -> Self {
        Self {
            has_public_setter_or_init: false,
            ..Self::read_write(name, ty)
        }
    }

    /// Property with only a public setter.
    pub fn write_only(name: impl Into<String>, ty: HostTypeRef) -> Self {
        Self {
            has_public_getter: false,
            ..Self::read_write(name, ty)
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default = "HostTypeRef::void")]
    pub returns: HostTypeRef,
    #[serde(default)]
    pub doc: Option<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: Vec<ParamDecl>, returns: HostTypeRef) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            doc: None,
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl ConstructorDecl {
    pub fn new(params: Vec<ParamDecl>, is_public: bool) -> Self {
        Self { params, is_public }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: HostTypeRef,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: HostTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A host type reference as written in the exported signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostTypeRef {
    /// `int`, `System.String`, `Acme.Person`, ...
    Named { name: String },
    /// `Task<int>`, `Nullable<long>`, `Func<int, bool>`, ...
    Generic { name: String, args: Vec<HostTypeRef> },
    /// `T[]`.
    Array { element: Box<HostTypeRef> },
    /// `T?`.
    Nullable { inner: Box<HostTypeRef> },
    /// Anonymous callable `(params) -> returns`.
    Delegate {
        #[serde(default)]
        params: Vec<HostTypeRef>,
        #[serde(default)]
        returns: Option<Box<HostTypeRef>>,
    },
    /// The analyzer could not resolve the symbol.
    Unresolved,
}

impl HostTypeRef {
    /// Shorthand for a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Shorthand for a generic reference.
    pub fn generic(name: impl Into<String>, args: Vec<HostTypeRef>) -> Self {
        Self::Generic {
            name: name.into(),
            args,
        }
    }

    /// Shorthand for `T[]`.
    pub fn array(element: HostTypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// Shorthand for `T?`.
    pub fn nullable(inner: HostTypeRef) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }

    /// The `void` reference.
    pub fn void() -> Self {
        Self::named("void")
    }
}

impl fmt::Display for HostTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name } => f.write_str(name),
            Self::Generic { name, args } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Self::Array { element } => write!(f, "{element}[]"),
            Self::Nullable { inner } => write!(f, "{inner}?"),
            Self::Delegate { params, returns } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(") => ")?;
                match returns {
                    Some(ret) => write!(f, "{ret}"),
                    None => f.write_str("void"),
                }
            }
            Self::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

fn default_true() -> bool {
    true
}
