use codefirst_core::schema::app::{PrimitiveType, Property};
use std::borrow::Cow;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Prefixes reserved words with `@`.
pub(super) fn escape(ident: &str) -> Cow<'_, str> {
    if KEYWORDS.contains(&ident) {
        Cow::Owned(format!("@{ident}"))
    } else {
        Cow::Borrowed(ident)
    }
}

/// Class name for an entity type or container name.
pub(super) fn class_name(name: &str) -> String {
    escape(name).into_owned()
}

/// A quoted string literal.
pub(super) fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Declared C# type of a scalar property.
pub(super) fn type_name(property: &Property) -> String {
    let name = match property.ty {
        PrimitiveType::Boolean => "bool",
        PrimitiveType::Byte => "byte",
        PrimitiveType::Int16 => "short",
        PrimitiveType::Int32 => "int",
        PrimitiveType::Int64 => "long",
        PrimitiveType::Decimal => "decimal",
        PrimitiveType::Single => "float",
        PrimitiveType::Double => "double",
        PrimitiveType::String => "string",
        PrimitiveType::DateTime => "System.DateTime",
        PrimitiveType::DateTimeOffset => "System.DateTimeOffset",
        PrimitiveType::Time => "System.TimeSpan",
        PrimitiveType::Guid => "System.Guid",
        PrimitiveType::Binary => "byte[]",
    };

    if property.nullable && property.ty.is_value_type() {
        format!("Nullable<{name}>")
    } else {
        name.to_string()
    }
}
