//! # Prism Semantic Model
//!
//! Binds parsed declaration files into a [`Compilation`]: a symbol arena with
//! merged namespaces and partial types, resolved type references, evaluated
//! constants and bound attributes.
//!
//! ## Architecture
//!
//! 1. **Binding** (`binder`): declare, resolve signatures, evaluate constants, bind
//!    attributes. Runs once per compilation and produces immutable data.
//! 2. **Handles**: [`Symbol`] and [`AttributeData`] are cheap views into that data
//!    with semantic equality.
//! 3. **Incrementality**: the [`project_compilation`] query rebinds a [`Project`] when one
//!    of its files or its options change.
//!
//! An embedded core library supplies `System.Object`, the primitive structs,
//! `System.Attribute`, `Nullable<T>` and the task types unless the options turn it
//! off.

pub mod attribute;
mod binder;
pub mod compilation;
pub mod constant;
mod core_library;
pub mod db;
pub mod display;
pub mod options;
pub mod special_type;
pub mod symbol;
pub mod symbols;

pub use attribute::AttributeData;
pub use compilation::Compilation;
pub use constant::{ConstantValue, TypedConstant, TypedConstantKind};
pub use core_library::CORE_LIBRARY_PATH;
pub use db::{project_compilation, Project, SemanticDatabaseImpl, SemanticDb};
pub use display::DisplayFormat;
pub use options::{CompilationOptions, NullableContext, OptionsError};
pub use special_type::SpecialType;
pub use symbol::{Symbol, SyntaxReference};
pub use symbols::{
    Accessibility, DeclModifiers, MethodKind, NullableAnnotation, SymbolKind, SymbolRef, TypeKind,
};
