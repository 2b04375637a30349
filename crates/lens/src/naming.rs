//! Name-casing conventions for generated members and parameters.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use prism_compiler_parser::lexer::lex;
use prism_compiler_parser::SyntaxKind;

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// `ConfigAttribute` -> `Config`. A name that is only the suffix is kept.
pub fn strip_attribute_suffix(name: &str) -> &str {
    match name.strip_suffix(ATTRIBUTE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// `IRepository` -> `Repository`; `Item` and `I` are returned unchanged.
pub fn strip_interface_prefix(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => &name[1..],
        _ => name,
    }
}

/// Upper camel case. A single-word name only has its first letter raised, so
/// acronyms survive: `HTTPClient` stays, `retryCount` becomes `RetryCount`.
pub fn property_name(name: &str) -> String {
    let name = name.trim_start_matches('@');
    if name.contains(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        return name.to_upper_camel_case();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower camel case, escaped with `@` when it collides with a reserved keyword.
pub fn parameter_name(name: &str) -> String {
    let camel = name.trim_start_matches('@').to_lower_camel_case();
    if is_reserved_keyword(&camel) {
        format!("@{camel}")
    } else {
        camel
    }
}

fn is_reserved_keyword(text: &str) -> bool {
    let (tokens, _) = lex(text);
    match tokens.as_slice() {
        [token] => {
            token.kind != SyntaxKind::IDENT
                && token.kind.text() == Some(text)
                && !is_contextual(token.kind)
        }
        _ => false,
    }
}

/// Keywords only inside particular constructs; elsewhere they are plain names.
const fn is_contextual(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        ASYNC_KW | GET_KW | INIT_KW | PARTIAL_KW | RECORD_KW | SET_KW | WHERE_KW
    )
}
