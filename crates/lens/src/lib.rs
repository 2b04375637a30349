#![allow(clippy::option_if_let_else)]

//! # Prism Lens
//!
//! Optional and validated views over compiler output. Every lookup into the
//! semantic model or the syntax tree yields an optional wrapper; downstream code
//! chains `map` / `filter` on it and validates once at the boundary.
//!
//! - [`OptionalSymbol`] / [`ValidSymbol`]: declared entities, with error symbols
//!   treated as absent
//! - [`OptionalSyntax`] / [`ValidSyntax`]: typed syntax nodes with structural equality
//!   and modifier editing
//! - [`OptionalAttribute`] / [`ValidAttribute`]: attribute applications and their
//!   arguments as [`OptionalArgument`]s
//! - [`QueryFactory`]: per-type constructors for typed attribute queries

pub mod attribute;
pub mod documentation;
pub mod naming;
pub mod query;
pub mod symbol;
pub mod syntax;

pub use attribute::{FromTypedConstant, OptionalArgument, OptionalAttribute, ValidAttribute};
pub use documentation::Documentation;
pub use query::{AttributeQuery, FactoryError, QueryFactory};
pub use symbol::{OptionalSymbol, ValidSymbol};
pub use syntax::{OptionalSyntax, ValidSyntax};

pub use prism_common::{EquatableArray, Optional, Projection, ProjectionError, Validation};
