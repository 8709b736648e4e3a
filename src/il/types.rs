//! Static type signatures attached to slots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in types that have a fixed place in the type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    Object,
    IntPtr,
    UIntPtr,
}

impl BuiltinType {
    /// Short name as it appears in metadata (`Int32`, `String`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::Void => "Void",
            BuiltinType::Boolean => "Boolean",
            BuiltinType::Char => "Char",
            BuiltinType::SByte => "SByte",
            BuiltinType::Byte => "Byte",
            BuiltinType::Int16 => "Int16",
            BuiltinType::UInt16 => "UInt16",
            BuiltinType::Int32 => "Int32",
            BuiltinType::UInt32 => "UInt32",
            BuiltinType::Int64 => "Int64",
            BuiltinType::UInt64 => "UInt64",
            BuiltinType::Single => "Single",
            BuiltinType::Double => "Double",
            BuiltinType::Decimal => "Decimal",
            BuiltinType::String => "String",
            BuiltinType::Object => "Object",
            BuiltinType::IntPtr => "IntPtr",
            BuiltinType::UIntPtr => "UIntPtr",
        }
    }

    pub fn namespace(&self) -> &'static str {
        "System"
    }
}

/// A named (class, struct, interface, enum) type, optionally instantiated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    #[serde(default)]
    pub namespace: String,
    /// Short name including any generic arity marker, e.g. ``List`1``
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<TypeSig>,
}

impl NamedType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<TypeSig>) -> Self {
        self.generic_args = args;
        self
    }

    /// Namespace-qualified name of the type definition (generic arguments excluded)
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Structural description of a slot's declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSig {
    Builtin(BuiltinType),
    Named(NamedType),
    Array(Box<TypeSig>),
    Pointer(Box<TypeSig>),
    ByReference(Box<TypeSig>),
    /// Custom modifiers and pinning wrap the real type without changing it
    Modified(Box<TypeSig>),
}

impl TypeSig {
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeSig::Named(NamedType::new(namespace, name))
    }

    pub fn array_of(element: TypeSig) -> Self {
        TypeSig::Array(Box::new(element))
    }

    pub fn pointer_to(element: TypeSig) -> Self {
        TypeSig::Pointer(Box::new(element))
    }

    pub fn by_ref(element: TypeSig) -> Self {
        TypeSig::ByReference(Box::new(element))
    }

    /// ``System.Nullable`1`` instantiated over `inner`
    pub fn nullable(inner: TypeSig) -> Self {
        TypeSig::Named(NamedType::new("System", "Nullable`1").with_args(vec![inner]))
    }

    /// Strip modifier wrappers
    pub fn unpack_modifiers(&self) -> &TypeSig {
        let mut ty = self;
        while let TypeSig::Modified(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// Short name in metadata form: arrays and pointers carry their suffix
    pub fn name(&self) -> String {
        match self {
            TypeSig::Builtin(builtin) => builtin.name().to_string(),
            TypeSig::Named(named) => named.name.clone(),
            TypeSig::Array(element) => format!("{}[]", element.name()),
            TypeSig::Pointer(element) => format!("{}*", element.name()),
            TypeSig::ByReference(element) => format!("{}&", element.name()),
            TypeSig::Modified(inner) => inner.name(),
        }
    }

    /// Namespace-qualified name, generic arguments excluded
    pub fn full_name(&self) -> String {
        match self {
            TypeSig::Builtin(builtin) => format!("{}.{}", builtin.namespace(), builtin.name()),
            TypeSig::Named(named) => named.full_name(),
            TypeSig::Array(element) => format!("{}[]", element.full_name()),
            TypeSig::Pointer(element) => format!("{}*", element.full_name()),
            TypeSig::ByReference(element) => format!("{}&", element.full_name()),
            TypeSig::Modified(inner) => inner.full_name(),
        }
    }

    /// Exactly the 32-bit signed integer type, without modifiers
    pub fn is_int32(&self) -> bool {
        match self {
            TypeSig::Builtin(BuiltinType::Int32) => true,
            TypeSig::Named(named) => {
                named.generic_args.is_empty() && named.full_name() == "System.Int32"
            }
            _ => false,
        }
    }

    /// Inner type of a single-argument ``System.Nullable`1`` instantiation
    pub fn nullable_inner(&self) -> Option<&TypeSig> {
        match self {
            TypeSig::Named(named)
                if named.full_name() == "System.Nullable`1" && named.generic_args.len() == 1 =>
            {
                named.generic_args.first()
            }
            _ => None,
        }
    }
}

impl From<BuiltinType> for TypeSig {
    fn from(builtin: BuiltinType) -> Self {
        TypeSig::Builtin(builtin)
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSig::Named(named) if !named.generic_args.is_empty() => {
                write!(f, "{}<", named.full_name())?;
                for (index, arg) in named.generic_args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TypeSig::Array(element) => write!(f, "{}[]", element),
            TypeSig::Pointer(element) => write!(f, "{}*", element),
            TypeSig::ByReference(element) => write!(f, "{}&", element),
            TypeSig::Modified(inner) => write!(f, "{} modopt", inner),
            other => write!(f, "{}", other.full_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_names() {
        assert_eq!(TypeSig::from(BuiltinType::Int32).full_name(), "System.Int32");
        assert_eq!(TypeSig::named("", "Widget").full_name(), "Widget");
        assert_eq!(
            TypeSig::array_of(BuiltinType::Byte.into()).name(),
            "Byte[]"
        );
    }

    #[test]
    fn test_int32_detection() {
        assert!(TypeSig::from(BuiltinType::Int32).is_int32());
        assert!(TypeSig::named("System", "Int32").is_int32());
        assert!(!TypeSig::from(BuiltinType::UInt32).is_int32());
        assert!(!TypeSig::Modified(Box::new(BuiltinType::Int32.into())).is_int32());
    }

    #[test]
    fn test_nullable_inner() {
        let nullable = TypeSig::nullable(BuiltinType::Boolean.into());
        assert_eq!(
            nullable.nullable_inner(),
            Some(&TypeSig::Builtin(BuiltinType::Boolean))
        );
        assert_eq!(TypeSig::named("System", "Nullable`1").nullable_inner(), None);
        assert_eq!(nullable.to_string(), "System.Nullable`1<System.Boolean>");
    }
}
