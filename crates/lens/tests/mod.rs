//! # Lens Tests
//!
//! Tests are grouped by concern:
//!
//! - `symbols/` - validation, derived facts, hierarchy, generics and identity
//! - `syntax/` - declaring syntax, structural equality and modifier edits
//! - `attributes/` - argument extraction and typed queries
//! - `laws/` - algebraic properties shared by every wrapper

pub use prism_compiler_semantic::Compilation;
pub use prism_lens::*;
pub use prism_test_utils::{compile, compile_files, compile_fixture, init_tracing, TestProject};

mod attributes;
mod laws;
mod symbols;
mod syntax;

/// The `shop/orders.cs` fixture, bound.
pub fn shop() -> Compilation {
    compile_fixture("shop/orders.cs").unwrap()
}

#[track_caller]
pub fn valid_type(compilation: &Compilation, metadata_name: &str) -> ValidSymbol {
    OptionalSymbol::new(compilation.get_type_by_metadata_name(metadata_name))
        .validate()
        .unwrap_or_else(|| panic!("no valid type {metadata_name}"))
}

#[track_caller]
pub fn valid_member(symbol: &ValidSymbol, name: &str) -> ValidSymbol {
    symbol
        .get_member(name)
        .validate()
        .unwrap_or_else(|| panic!("{symbol} has no member {name}"))
}

pub fn names(symbols: impl IntoIterator<Item = ValidSymbol>) -> Vec<String> {
    symbols.into_iter().map(|symbol| symbol.name().to_string()).collect()
}
