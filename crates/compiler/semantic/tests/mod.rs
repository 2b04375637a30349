//! # Semantic Model Tests
//!
//! Tests are grouped by concern:
//!
//! - `binding/` - declarations, partial types, name resolution, nullability
//! - `constants/` - enum member values and `const` fields
//! - `attributes/` - attribute class lookup, constructor selection, arguments
//! - `symbols/` - symbol identity, display strings, locations and documentation

pub mod common;
pub use common::*;

mod attributes;
mod binding;
mod constants;
mod symbols;
