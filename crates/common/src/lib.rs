#![allow(clippy::option_if_let_else)]

//! # Prism Common
//!
//! Value-level building blocks shared by every Prism crate:
//!
//! - [`Projection`] and [`Validation`]: the contracts every optional wrapper satisfies
//! - [`Optional`]: the generic optional value wrapper
//! - [`EquatableArray`]: an immutable sequence with element-wise equality, usable as a cache key
//! - [`EnumValue`] / [`EnumSource`]: coercion of raw integers and strings into enumerants

pub mod enum_value;
pub mod equatable_array;
pub mod optional;
pub mod projection;

pub use enum_value::{EnumSource, EnumValue};
pub use equatable_array::EquatableArray;
pub use optional::Optional;
pub use projection::{Projection, ProjectionError, Validation};
