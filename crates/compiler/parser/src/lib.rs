//! # Declaration Syntax
//!
//! Lexer, lossless syntax tree and typed AST for a declaration-only C#-like language:
//! namespaces, usings, type declarations, members and attributes. Member bodies are
//! kept as opaque token runs.
//!
//! The entry points are [`parse_text`] for direct use and the [`parse_file`] salsa
//! query for incremental use.

pub mod ast;
mod db;
pub mod doc;
pub mod lexer;
pub mod parser;
mod syntax;
mod syntax_kind;

pub use db::{parse_file, Db, ParserDatabaseImpl, SourceFile, Upcast};
pub use parser::{parse_text, Parse};
pub use rowan::{TextRange, TextSize};
pub use syntax::{debug_tree, is_equivalent, structural_hash, with_modifier_list};
pub use syntax_kind::{Lang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
