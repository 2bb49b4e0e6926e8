use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified identity of a type (e.g., "org.example.steps.SleepStep")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIdentity(pub String);

impl TypeIdentity {
    /// Create a new type identity
    pub fn new(name: impl Into<String>) -> Self {
        TypeIdentity(name.into())
    }

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TypeIdentity {
    fn from(s: String) -> Self {
        TypeIdentity(s)
    }
}

impl From<&str> for TypeIdentity {
    fn from(s: &str) -> Self {
        TypeIdentity(s.to_string())
    }
}

impl AsRef<str> for TypeIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fully reified declared type of a parameter.
///
/// The erased type of a parameter only names its raw type; the declared type
/// keeps the type arguments so collection element types can be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A plain type with no type arguments
    Concrete(TypeIdentity),

    /// A generic type applied to type arguments (e.g., `List<String>`)
    Parameterized {
        /// The raw generic type
        raw: TypeIdentity,
        /// Type arguments, in declaration order
        arguments: Vec<TypeRef>,
    },

    /// A wildcard argument, optionally bounded (e.g., `? extends Foo`)
    Wildcard {
        /// Upper bound of the wildcard, if any
        bound: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    /// Shorthand for a concrete type
    pub fn concrete(name: impl Into<String>) -> Self {
        TypeRef::Concrete(TypeIdentity::new(name))
    }

    /// Shorthand for a parameterized type
    pub fn parameterized(raw: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: TypeIdentity::new(raw),
            arguments,
        }
    }

    /// An unbounded wildcard
    pub fn wildcard() -> Self {
        TypeRef::Wildcard { bound: None }
    }

    /// Type arguments of a parameterized type; empty for everything else
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Parameterized { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// The concrete identity, if this is a concrete type
    pub fn as_concrete(&self) -> Option<&TypeIdentity> {
        match self {
            TypeRef::Concrete(identity) => Some(identity),
            _ => None,
        }
    }
}

/// A parameter declared by an introspectable type, as reported by the
/// introspection model provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    /// Declared identifier of the parameter (wire name)
    pub name: String,

    /// Display name supplied by the provider; derived from `name` when absent
    pub capitalized_name: Option<String>,

    /// Erased value type
    pub erased_type: TypeIdentity,

    /// Fully reified declared type
    pub declared_type: TypeRef,

    /// A parameter with no default and no nullable marker is required
    pub required: bool,
}

impl ParameterDeclaration {
    /// Declare a parameter whose declared type is its erased type
    pub fn new(name: impl Into<String>, erased_type: impl Into<String>, required: bool) -> Self {
        let erased_type = TypeIdentity::new(erased_type);
        Self {
            name: name.into(),
            capitalized_name: None,
            declared_type: TypeRef::Concrete(erased_type.clone()),
            erased_type,
            required,
        }
    }

    /// Replace the declared type
    pub fn with_declared_type(mut self, declared_type: TypeRef) -> Self {
        self.declared_type = declared_type;
        self
    }

    /// Display name for this parameter
    pub fn display_name(&self) -> String {
        match &self.capitalized_name {
            Some(name) => name.clone(),
            None => capitalize(&self.name),
        }
    }
}

/// Upper-case the first character of an identifier
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
