//! Identifier grammar and candidate clean-up

/// Stem used when nothing better is available
pub const FALLBACK_STEM: &str = "obj";

/// Is `name` a legal bare identifier: a letter or underscore, then letters,
/// digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Turn a member, method or type name into a variable-style stem
///
/// Drops a generic arity marker (`` `1 ``), a `m_` or single `_` field prefix,
/// and lower-cases the first character. An empty result becomes [`FALLBACK_STEM`].
pub fn clean_up_name(name: &str) -> String {
    let mut name = match name.find('`') {
        Some(pos) => &name[..pos],
        None => name,
    };

    if name.len() > 2 && name.starts_with("m_") {
        name = &name[2..];
    } else if name.len() > 1 && name.starts_with('_') {
        name = &name[1..];
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => FALLBACK_STEM.to_string(),
    }
}
