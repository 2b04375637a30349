//! Rendering symbols as C# text.

use crate::special_type::SpecialType;
use crate::symbol::Symbol;
use crate::symbols::{MethodKind, NullableAnnotation, SymbolKind};

/// How much qualification a rendered name carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DisplayFormat {
    /// `List<int>`
    Minimal,
    /// `System.Collections.Generic.List<int>`
    #[default]
    Qualified,
    /// `global::System.Collections.Generic.List<int>`
    FullyQualified,
}

pub(crate) fn display_symbol(symbol: &Symbol, format: DisplayFormat) -> String {
    match symbol.kind() {
        SymbolKind::Namespace => display_namespace(symbol, format),
        SymbolKind::NamedType | SymbolKind::TypeParameter | SymbolKind::ArrayType | SymbolKind::ErrorType => {
            display_type(symbol, format)
        }
        SymbolKind::Method => display_method(symbol, format),
        SymbolKind::Property | SymbolKind::Field => match (format, symbol.containing_type()) {
            (DisplayFormat::Minimal, _) | (_, None) => symbol.name().to_string(),
            (format, Some(owner)) => format!("{}.{}", display_type(&owner, format), symbol.name()),
        },
        SymbolKind::Parameter => symbol.name().to_string(),
    }
}

fn display_namespace(symbol: &Symbol, format: DisplayFormat) -> String {
    if symbol.is_global_namespace() {
        return "<global namespace>".to_string();
    }
    match format {
        DisplayFormat::Minimal => symbol.name().to_string(),
        DisplayFormat::Qualified => namespace_path(symbol),
        DisplayFormat::FullyQualified => {
            let prefix = &symbol.compilation().options().global_prefix;
            format!("{prefix}{}", namespace_path(symbol))
        }
    }
}

fn namespace_path(symbol: &Symbol) -> String {
    let mut parts = vec![symbol.name()];
    let mut current = symbol.containing_symbol();
    while let Some(namespace) = current {
        if namespace.is_global_namespace() {
            break;
        }
        parts.push(namespace.name());
        current = namespace.containing_symbol();
    }
    parts.reverse();
    parts.join(".")
}

fn display_type(symbol: &Symbol, format: DisplayFormat) -> String {
    let mut text = display_type_core(symbol, format);
    if format != DisplayFormat::FullyQualified
        && symbol.nullable_annotation() == NullableAnnotation::Annotated
        && !text.ends_with('?')
    {
        text.push('?');
    }
    text
}

fn display_type_core(symbol: &Symbol, format: DisplayFormat) -> String {
    match symbol.kind() {
        SymbolKind::ArrayType => {
            let element = symbol
                .element_type()
                .map(|element| display_type(&element, format))
                .unwrap_or_default();
            let commas = ",".repeat(usize::from(symbol.array_rank().unwrap_or(1).saturating_sub(1)));
            format!("{element}[{commas}]")
        }
        SymbolKind::TypeParameter | SymbolKind::ErrorType => symbol.name().to_string(),
        _ => {
            let definition = symbol.original_definition();
            if let Some(keyword) = definition.special_type().and_then(SpecialType::keyword) {
                return keyword.to_string();
            }
            if definition.special_type() == Some(SpecialType::Nullable) {
                if let Some(inner) = symbol.type_arguments().first() {
                    return format!("{}?", display_type(inner, format));
                }
            }
            let mut text = match format {
                DisplayFormat::Minimal => String::new(),
                _ => type_prefix(symbol, format),
            };
            text.push_str(&symbol.name());
            push_type_arguments(&mut text, &symbol.type_arguments(), format);
            text
        }
    }
}

/// `Ns.Outer<T>.` for a named type, empty at global scope.
fn type_prefix(symbol: &Symbol, format: DisplayFormat) -> String {
    match symbol.containing_symbol() {
        Some(owner) if owner.kind() == SymbolKind::NamedType => {
            format!("{}.", display_type_core(&owner, format))
        }
        Some(owner) if !owner.is_global_namespace() => {
            format!("{}.", display_namespace(&owner, format))
        }
        _ if format == DisplayFormat::FullyQualified => {
            symbol.compilation().options().global_prefix.clone()
        }
        _ => String::new(),
    }
}

fn push_type_arguments(text: &mut String, arguments: &[Symbol], format: DisplayFormat) {
    if arguments.is_empty() {
        return;
    }
    let arguments: Vec<String> = arguments.iter().map(|a| display_type(a, format)).collect();
    text.push('<');
    text.push_str(&arguments.join(", "));
    text.push('>');
}

fn display_method(symbol: &Symbol, format: DisplayFormat) -> String {
    let owner = symbol.containing_type();
    let name = match symbol.method_kind() {
        Some(MethodKind::Constructor | MethodKind::StaticConstructor) => owner
            .as_ref()
            .map(|owner| owner.name().to_string())
            .unwrap_or_else(|| symbol.name().to_string()),
        _ => symbol.name().to_string(),
    };
    let mut text = match (format, &owner) {
        (DisplayFormat::Minimal, _) | (_, None) => String::new(),
        (format, Some(owner)) => format!("{}.", display_type(owner, format)),
    };
    text.push_str(&name);
    push_type_arguments(&mut text, &symbol.type_parameters(), format);
    let parameters: Vec<String> = symbol
        .parameters()
        .iter()
        .map(|parameter| {
            let ty = parameter
                .ty()
                .map(|ty| display_type(&ty, format))
                .unwrap_or_default();
            if parameter.is_params() {
                format!("params {ty}")
            } else {
                ty
            }
        })
        .collect();
    text.push('(');
    text.push_str(&parameters.join(", "));
    text.push(')');
    text
}
