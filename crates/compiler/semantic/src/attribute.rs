//! Bound attribute applications.

use std::fmt;

use prism_compiler_parser::SyntaxNode;
use smol_str::SmolStr;

use crate::compilation::Compilation;
use crate::constant::TypedConstant;
use crate::symbol::Symbol;
use crate::symbols::{BoundAttribute, NullableAnnotation, SymbolIndex, SymbolRef};

/// One attribute applied to a symbol: its class, the constructor it binds to and
/// its arguments as typed constants.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttributeData {
    compilation: Compilation,
    owner: SymbolIndex,
    index: usize,
}

impl AttributeData {
    pub(crate) fn new(compilation: Compilation, owner: SymbolIndex, index: usize) -> Self {
        Self {
            compilation,
            owner,
            index,
        }
    }

    fn bound(&self) -> &BoundAttribute {
        &self.compilation.data().symbols[self.owner].attributes[self.index]
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// The attribute class; an error symbol when the name did not bind.
    pub fn attribute_class(&self) -> Symbol {
        self.compilation.symbol(self.bound().class.clone())
    }

    pub fn constructor(&self) -> Option<Symbol> {
        self.bound()
            .constructor
            .map(|index| self.compilation.symbol(SymbolRef::Declared(index)))
    }

    /// Positional arguments in parameter order, optional parameters filled with
    /// their defaults and `params` arguments packed into one array.
    pub fn constructor_args(&self) -> &[TypedConstant] {
        &self.bound().constructor_args
    }

    pub fn named_args(&self) -> &[(SmolStr, TypedConstant)] {
        &self.bound().named_args
    }

    pub fn named_arg(&self, name: &str) -> Option<&TypedConstant> {
        self.named_args()
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }

    /// The `[...]` entry this attribute was written as.
    pub fn application_syntax(&self) -> Option<SyntaxNode> {
        self.compilation.data().node_at(&self.bound().site)
    }

    /// The type of a constant carried by this attribute, as a symbol.
    pub fn constant_type(&self, constant: &TypedConstant) -> Option<Symbol> {
        constant
            .ty
            .clone()
            .map(|ty| Symbol::new(self.compilation.clone(), ty, NullableAnnotation::None))
    }

    /// A `typeof(...)` argument as a symbol.
    pub fn type_value(&self, constant: &TypedConstant) -> Option<Symbol> {
        constant.as_type().map(|ty| self.compilation.symbol(ty.clone()))
    }
}

impl fmt::Debug for AttributeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeData")
            .field("class", &self.attribute_class())
            .field("constructor_args", &self.constructor_args())
            .field("named_args", &self.named_args())
            .finish()
    }
}
