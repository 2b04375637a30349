//! # Symbol Storage
//!
//! Declared symbols live in one arena per compilation, addressed by [`SymbolIndex`].
//! Types that are not declarations (constructed generics, arrays, unresolved names)
//! are described by [`SymbolRef`] values that point back into the arena.

use std::sync::Arc;

use bitflags::bitflags;
use prism_compiler_parser::{SyntaxKind, TextRange};
use smol_str::SmolStr;

use crate::constant::TypedConstant;

index_vec::define_index_type! {
    /// Unique ID for a declared symbol within a compilation
    pub struct SymbolIndex = usize;

    MAX_INDEX = usize::MAX;
}

index_vec::define_index_type! {
    /// Unique ID for a source file within a compilation
    pub struct FileIndex = usize;

    MAX_INDEX = usize::MAX;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    NamedType,
    Method,
    Property,
    Field,
    Parameter,
    TypeParameter,
    ArrayType,
    ErrorType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    Error,
}

/// Declared accessibility, ordered from least to most visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessibility {
    NotApplicable,
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    StaticConstructor,
    DelegateInvoke,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NullableAnnotation {
    /// Written in a context where nullability is not tracked.
    #[default]
    None,
    NotAnnotated,
    Annotated,
}

bitflags! {
    /// Declaration modifiers, written or implied.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclModifiers: u32 {
        const STATIC = 1 << 0;
        const ABSTRACT = 1 << 1;
        const SEALED = 1 << 2;
        const VIRTUAL = 1 << 3;
        const OVERRIDE = 1 << 4;
        const EXTERN = 1 << 5;
        const READONLY = 1 << 6;
        const CONST = 1 << 7;
        const ASYNC = 1 << 8;
        const PARTIAL = 1 << 9;
        const NEW = 1 << 10;
        const UNSAFE = 1 << 11;
        const VOLATILE = 1 << 12;
        /// Synthesized by the compiler rather than written in source.
        const IMPLICIT = 1 << 13;
        const RECORD = 1 << 14;
        /// Property with a `get` accessor.
        const GETTER = 1 << 15;
        /// Property with a `set` or `init` accessor.
        const SETTER = 1 << 16;
        const INIT_ONLY = 1 << 17;
        /// `params` parameter.
        const PARAMS = 1 << 18;
        /// Parameter with a default value.
        const OPTIONAL = 1 << 19;
    }
}

impl DeclModifiers {
    /// The flag a modifier keyword sets, if it maps to one.
    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let flag = match kind {
            SyntaxKind::STATIC_KW => Self::STATIC,
            SyntaxKind::ABSTRACT_KW => Self::ABSTRACT,
            SyntaxKind::SEALED_KW => Self::SEALED,
            SyntaxKind::VIRTUAL_KW => Self::VIRTUAL,
            SyntaxKind::OVERRIDE_KW => Self::OVERRIDE,
            SyntaxKind::EXTERN_KW => Self::EXTERN,
            SyntaxKind::READONLY_KW => Self::READONLY,
            SyntaxKind::CONST_KW => Self::CONST,
            SyntaxKind::ASYNC_KW => Self::ASYNC,
            SyntaxKind::PARTIAL_KW => Self::PARTIAL,
            SyntaxKind::NEW_KW => Self::NEW,
            SyntaxKind::UNSAFE_KW => Self::UNSAFE,
            SyntaxKind::VOLATILE_KW => Self::VOLATILE,
            _ => return None,
        };
        Some(flag)
    }
}

/// A reference to a symbol or to a type built out of declared symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    Declared(SymbolIndex),
    /// A generic type definition applied to type arguments.
    Constructed {
        definition: SymbolIndex,
        arguments: Arc<[SymbolRef]>,
    },
    Array {
        element: Arc<SymbolRef>,
        rank: u8,
    },
    /// A name that could not be bound.
    Error { name: SmolStr, arity: u16 },
}

impl SymbolRef {
    /// The declared symbol this reference is built on, if any.
    pub fn definition(&self) -> Option<SymbolIndex> {
        match self {
            Self::Declared(index) | Self::Constructed { definition: index, .. } => Some(*index),
            Self::Array { .. } | Self::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn error(name: impl Into<SmolStr>, arity: usize) -> Self {
        Self::Error {
            name: name.into(),
            arity: arity as u16,
        }
    }
}

/// A type together with the nullable annotation it was written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedType {
    pub ty: SymbolRef,
    pub annotation: NullableAnnotation,
}

/// Where a symbol is declared: a node identified by file, kind and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclSite {
    pub file: FileIndex,
    pub kind: SyntaxKind,
    pub range: TextRange,
}

/// An attribute application after binding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoundAttribute {
    pub class: SymbolRef,
    pub constructor: Option<SymbolIndex>,
    pub constructor_args: Vec<TypedConstant>,
    pub named_args: Vec<(SmolStr, TypedConstant)>,
    pub site: DeclSite,
}

#[derive(Debug, Clone)]
pub(crate) struct SymbolData {
    pub kind: SymbolKind,
    pub type_kind: Option<TypeKind>,
    pub name: SmolStr,
    pub containing: Option<SymbolIndex>,
    pub accessibility: Accessibility,
    pub modifiers: DeclModifiers,
    pub declarations: Vec<DeclSite>,
    pub members: Vec<SymbolIndex>,
    pub type_parameters: Vec<SymbolIndex>,
    pub parameters: Vec<SymbolIndex>,
    /// Position among the parameters or type parameters of the owner.
    pub ordinal: usize,
    pub method_kind: Option<MethodKind>,
    pub base_type: Option<SymbolRef>,
    pub interfaces: Vec<SymbolRef>,
    /// Field, property and parameter type, method return type, enum underlying type.
    pub ty: Option<AnnotatedType>,
    pub attributes: Vec<BoundAttribute>,
    pub constant: Option<TypedConstant>,
}

impl SymbolData {
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>, containing: Option<SymbolIndex>) -> Self {
        Self {
            kind,
            type_kind: match kind {
                SymbolKind::TypeParameter => Some(TypeKind::TypeParameter),
                _ => None,
            },
            name: name.into(),
            containing,
            accessibility: Accessibility::NotApplicable,
            modifiers: DeclModifiers::empty(),
            declarations: Vec::new(),
            members: Vec::new(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            ordinal: 0,
            method_kind: None,
            base_type: None,
            interfaces: Vec::new(),
            ty: None,
            attributes: Vec::new(),
            constant: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::NamedType | SymbolKind::TypeParameter)
    }
}
