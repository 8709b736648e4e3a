//! Language keywords that must never be produced as variable names

/// C# keywords, including contextual ones that are unsafe as local names
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while", "await", "async", "dynamic", "value", "var", "yield",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::identifier::is_valid_identifier;

    #[test]
    fn test_keywords_are_identifier_shaped() {
        assert!(CSHARP_KEYWORDS.iter().all(|word| is_valid_identifier(word)));
        assert!(CSHARP_KEYWORDS.contains(&"value"));
    }
}
