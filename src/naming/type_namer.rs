//! Fallback names derived from a slot's static type

use super::identifier::clean_up_name;
use crate::il::TypeSig;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Stems for well-known types, keyed by namespace-qualified name
static BUILTIN_TYPE_STEMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("System.Boolean", "flag"),
        ("System.Byte", "b"),
        ("System.SByte", "b"),
        ("System.Int16", "num"),
        ("System.Int32", "num"),
        ("System.Int64", "num"),
        ("System.UInt16", "num"),
        ("System.UInt32", "num"),
        ("System.UInt64", "num"),
        ("System.Single", "num"),
        ("System.Double", "num"),
        ("System.Decimal", "num"),
        ("System.String", "text"),
        ("System.Object", "obj"),
        ("System.Char", "c"),
    ])
});

/// Stem proposed for a slot of type `ty`
pub fn name_for_type(ty: &TypeSig) -> String {
    let mut ty = ty.unpack_modifiers();
    if let Some(inner) = ty.nullable_inner() {
        ty = inner;
    }

    match ty {
        TypeSig::Array(_) => "array".to_string(),
        TypeSig::Pointer(_) | TypeSig::ByReference(_) => "ptr".to_string(),
        _ => {
            let short_name = ty.name();
            if short_name.ends_with("Exception") {
                return "ex".to_string();
            }
            if let Some(stem) = BUILTIN_TYPE_STEMS.get(ty.full_name().as_str()) {
                return stem.to_string();
            }
            clean_up_name(strip_interface_prefix(&short_name))
        }
    }
}

/// `IDisposable` -> `Disposable`, but `IO` and `Item` stay as they are
fn strip_interface_prefix(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('I'), Some(second), Some(third)) if second.is_uppercase() && third.is_lowercase() => {
            &name[1..]
        }
        _ => name,
    }
}
