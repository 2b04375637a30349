//! # Symbols
//!
//! [`Symbol`] is the public handle on a declared entity or a type built from
//! declared entities. It pairs a [`Compilation`] with a [`SymbolRef`]; every fact is
//! read from the compilation's arena on demand.
//!
//! Equality is semantic: two handles are equal when they denote the same entity of
//! the same compilation, however they were obtained. The nullable annotation a type
//! was written with does not take part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use prism_compiler_diagnostics::Location;
use prism_compiler_parser::ast::{
    AstNode, HasName, MemberDecl, Param, TypeParam, VariableDeclarator,
};
use prism_compiler_parser::{SyntaxKind, SyntaxNode, TextRange};
use smol_str::SmolStr;

use crate::attribute::AttributeData;
use crate::compilation::{Compilation, CompilationData};
use crate::constant::TypedConstant;
use crate::display::{display_symbol, DisplayFormat};
use crate::special_type::SpecialType;
use crate::symbols::{
    Accessibility, DeclModifiers, DeclSite, MethodKind, NullableAnnotation, SymbolData, SymbolIndex,
    SymbolKind, SymbolRef, TypeKind,
};

#[derive(Clone)]
pub struct Symbol {
    compilation: Compilation,
    reference: SymbolRef,
    annotation: NullableAnnotation,
}

impl Symbol {
    pub(crate) fn new(
        compilation: Compilation,
        reference: SymbolRef,
        annotation: NullableAnnotation,
    ) -> Self {
        Self {
            compilation,
            reference,
            annotation,
        }
    }

    fn related(&self, reference: SymbolRef) -> Self {
        self.compilation.symbol(reference)
    }

    fn declared_symbol(&self, index: SymbolIndex) -> Self {
        self.related(SymbolRef::Declared(index))
    }

    fn data(&self) -> &CompilationData {
        self.compilation.data()
    }

    /// Arena entry of the symbol, or of the generic definition it constructs.
    fn definition_data(&self) -> Option<&SymbolData> {
        self.reference.definition().map(|index| &self.data().symbols[index])
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    pub fn reference(&self) -> &SymbolRef {
        &self.reference
    }

    pub fn kind(&self) -> SymbolKind {
        match &self.reference {
            SymbolRef::Declared(index) => self.data().symbols[*index].kind,
            SymbolRef::Constructed { .. } => SymbolKind::NamedType,
            SymbolRef::Array { .. } => SymbolKind::ArrayType,
            SymbolRef::Error { .. } => SymbolKind::ErrorType,
        }
    }

    /// The type kind, for symbols that are types.
    pub fn type_kind(&self) -> Option<TypeKind> {
        self.is_type().then(|| self.data().type_kind(&self.reference))
    }

    /// Whether this symbol stands for a name that could not be bound.
    pub fn is_error(&self) -> bool {
        self.reference.is_error()
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self.kind(),
            SymbolKind::NamedType | SymbolKind::TypeParameter | SymbolKind::ArrayType | SymbolKind::ErrorType
        )
    }

    pub fn name(&self) -> SmolStr {
        match &self.reference {
            SymbolRef::Declared(_) | SymbolRef::Constructed { .. } => self
                .definition_data()
                .map(|data| data.name.clone())
                .unwrap_or_default(),
            SymbolRef::Array { .. } => SmolStr::default(),
            SymbolRef::Error { name, .. } => name.clone(),
        }
    }

    /// The name with a `` `N `` arity suffix for generic types.
    pub fn metadata_name(&self) -> String {
        let arity = self.arity();
        if self.kind() == SymbolKind::NamedType && arity > 0 {
            format!("{}`{arity}", self.name())
        } else {
            self.name().to_string()
        }
    }

    pub fn containing_symbol(&self) -> Option<Symbol> {
        let containing = self.definition_data()?.containing?;
        Some(self.declared_symbol(containing))
    }

    pub fn containing_type(&self) -> Option<Symbol> {
        let mut current = self.definition_data()?.containing;
        while let Some(index) = current {
            let data = &self.data().symbols[index];
            if data.kind == SymbolKind::NamedType {
                return Some(self.declared_symbol(index));
            }
            current = data.containing;
        }
        None
    }

    /// The innermost enclosing namespace, which is the global namespace for
    /// top-level declarations.
    pub fn containing_namespace(&self) -> Option<Symbol> {
        let mut current = self.definition_data()?.containing;
        while let Some(index) = current {
            let data = &self.data().symbols[index];
            if data.kind == SymbolKind::Namespace {
                return Some(self.declared_symbol(index));
            }
            current = data.containing;
        }
        None
    }

    pub fn is_global_namespace(&self) -> bool {
        self.reference == SymbolRef::Declared(self.data().global_namespace)
    }

    pub fn declared_accessibility(&self) -> Accessibility {
        self.definition_data()
            .map(|data| data.accessibility)
            .unwrap_or(Accessibility::NotApplicable)
    }

    pub fn modifiers(&self) -> DeclModifiers {
        self.definition_data()
            .map(|data| data.modifiers)
            .unwrap_or_default()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers().contains(DeclModifiers::STATIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(DeclModifiers::ABSTRACT)
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers().contains(DeclModifiers::SEALED)
    }

    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(DeclModifiers::VIRTUAL)
    }

    pub fn is_override(&self) -> bool {
        self.modifiers().contains(DeclModifiers::OVERRIDE)
    }

    pub fn is_extern(&self) -> bool {
        self.modifiers().contains(DeclModifiers::EXTERN)
    }

    pub fn is_readonly(&self) -> bool {
        self.modifiers().contains(DeclModifiers::READONLY)
    }

    pub fn is_const(&self) -> bool {
        self.modifiers().contains(DeclModifiers::CONST)
    }

    pub fn is_async(&self) -> bool {
        self.modifiers().contains(DeclModifiers::ASYNC)
    }

    pub fn is_record(&self) -> bool {
        self.modifiers().contains(DeclModifiers::RECORD)
    }

    /// Synthesized by the compiler: implicit constructors and delegate `Invoke`.
    pub fn is_implicitly_declared(&self) -> bool {
        self.modifiers().contains(DeclModifiers::IMPLICIT)
    }

    pub fn is_value_type(&self) -> bool {
        self.is_type() && self.data().is_value_type(&self.reference)
    }

    pub fn is_reference_type(&self) -> bool {
        self.is_type() && self.data().is_reference_type(&self.reference)
    }

    pub fn method_kind(&self) -> Option<MethodKind> {
        self.definition_data()?.method_kind
    }

    /// Position among the owner's parameters or type parameters.
    pub fn ordinal(&self) -> usize {
        self.definition_data().map_or(0, |data| data.ordinal)
    }

    pub fn is_params(&self) -> bool {
        self.modifiers().contains(DeclModifiers::PARAMS)
    }

    pub fn is_optional(&self) -> bool {
        self.modifiers().contains(DeclModifiers::OPTIONAL)
    }

    pub fn has_getter(&self) -> bool {
        self.modifiers().contains(DeclModifiers::GETTER)
    }

    pub fn has_setter(&self) -> bool {
        self.modifiers().contains(DeclModifiers::SETTER)
    }

    pub fn is_init_only(&self) -> bool {
        self.modifiers().contains(DeclModifiers::INIT_ONLY)
    }

    pub fn special_type(&self) -> Option<SpecialType> {
        match self.reference {
            SymbolRef::Declared(index) => self.data().special_type_of(index),
            _ => None,
        }
    }

    pub fn nullable_annotation(&self) -> NullableAnnotation {
        self.annotation
    }

    pub fn with_annotation(&self, annotation: NullableAnnotation) -> Symbol {
        Self::new(self.compilation.clone(), self.reference.clone(), annotation)
    }

    // ---- Generics --------------------------------------------------------------

    pub fn arity(&self) -> usize {
        match &self.reference {
            SymbolRef::Constructed { arguments, .. } => arguments.len(),
            SymbolRef::Error { arity, .. } => usize::from(*arity),
            _ => self.definition_data().map_or(0, SymbolData::arity),
        }
    }

    /// Declared type parameters of a generic type or method.
    pub fn type_parameters(&self) -> Vec<Symbol> {
        self.definition_data()
            .map(|data| {
                data.type_parameters
                    .iter()
                    .map(|&index| self.declared_symbol(index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Type arguments of a constructed type. A generic definition is its own
    /// construction over its type parameters.
    pub fn type_arguments(&self) -> Vec<Symbol> {
        match &self.reference {
            SymbolRef::Constructed { arguments, .. } => arguments
                .iter()
                .map(|argument| self.related(argument.clone()))
                .collect(),
            _ => self.type_parameters(),
        }
    }

    pub fn original_definition(&self) -> Symbol {
        match &self.reference {
            SymbolRef::Constructed { definition, .. } => self.declared_symbol(*definition),
            _ => self.clone(),
        }
    }

    /// This generic definition applied to `arguments`, when the arity matches.
    pub fn construct(&self, arguments: &[Symbol]) -> Option<Symbol> {
        let SymbolRef::Declared(definition) = self.reference else {
            return None;
        };
        let data = &self.data().symbols[definition];
        if data.kind != SymbolKind::NamedType || data.arity() != arguments.len() || arguments.is_empty() {
            return None;
        }
        if arguments.iter().any(|argument| argument.compilation != self.compilation) {
            return None;
        }
        let arguments = arguments.iter().map(|a| a.reference.clone()).collect();
        Some(self.related(self.data().constructed(definition, arguments)))
    }

    // ---- Hierarchy -------------------------------------------------------------

    pub fn base_type(&self) -> Option<Symbol> {
        let base = self.definition_data()?.base_type.as_ref()?;
        Some(self.related(self.data().substitute_through(base, &self.reference)))
    }

    /// Directly implemented interfaces, type arguments substituted.
    pub fn interfaces(&self) -> Vec<Symbol> {
        self.definition_data()
            .map(|data| {
                data.interfaces
                    .iter()
                    .map(|interface| self.related(self.data().substitute_through(interface, &self.reference)))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ---- Members ---------------------------------------------------------------

    pub fn members(&self) -> Vec<Symbol> {
        self.definition_data()
            .map(|data| {
                data.members
                    .iter()
                    .map(|&index| self.declared_symbol(index))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_members(&self, name: &str) -> Vec<Symbol> {
        self.definition_data()
            .map(|data| {
                data.members
                    .iter()
                    .copied()
                    .filter(|&index| self.data().symbols[index].name == name)
                    .map(|index| self.declared_symbol(index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Type of a field, property or parameter, with its nullable annotation.
    pub fn ty(&self) -> Option<Symbol> {
        match self.kind() {
            SymbolKind::Field | SymbolKind::Property | SymbolKind::Parameter => self.annotated_type(),
            _ => None,
        }
    }

    /// Return type of a method. A delegate returns what its `Invoke` returns.
    pub fn return_type(&self) -> Option<Symbol> {
        match self.kind() {
            SymbolKind::Method => self.annotated_type(),
            SymbolKind::NamedType if self.type_kind() == Some(TypeKind::Delegate) => {
                self.delegate_invoke()?.return_type()
            }
            _ => None,
        }
    }

    pub fn parameters(&self) -> Vec<Symbol> {
        match self.kind() {
            SymbolKind::Method => self
                .definition_data()
                .map(|data| {
                    data.parameters
                        .iter()
                        .map(|&index| self.declared_symbol(index))
                        .collect()
                })
                .unwrap_or_default(),
            SymbolKind::NamedType => self
                .delegate_invoke()
                .map(|invoke| invoke.parameters())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn delegate_invoke(&self) -> Option<Symbol> {
        let data = self.definition_data()?;
        data.members
            .iter()
            .copied()
            .find(|&index| self.data().symbols[index].method_kind == Some(MethodKind::DelegateInvoke))
            .map(|index| self.declared_symbol(index))
    }

    fn annotated_type(&self) -> Option<Symbol> {
        let ty = self.definition_data()?.ty.as_ref()?;
        Some(Self::new(self.compilation.clone(), ty.ty.clone(), ty.annotation))
    }

    pub fn element_type(&self) -> Option<Symbol> {
        match &self.reference {
            SymbolRef::Array { element, .. } => Some(self.related(element.as_ref().clone())),
            _ => None,
        }
    }

    pub fn array_rank(&self) -> Option<u8> {
        match &self.reference {
            SymbolRef::Array { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    pub fn enum_underlying_type(&self) -> Option<Symbol> {
        (self.type_kind() == Some(TypeKind::Enum))
            .then(|| self.annotated_type())
            .flatten()
    }

    /// Value of a constant field or enum member.
    pub fn constant_value(&self) -> Option<&TypedConstant> {
        self.definition_data()?.constant.as_ref()
    }

    // ---- Attributes and declarations -------------------------------------------

    /// Attribute applications on this symbol, across all of its declarations.
    pub fn attributes(&self) -> Vec<AttributeData> {
        let Some(index) = self.reference.definition() else {
            return Vec::new();
        };
        (0..self.data().symbols[index].attributes.len())
            .map(|position| AttributeData::new(self.compilation.clone(), index, position))
            .collect()
    }

    pub fn declaring_syntax_references(&self) -> Vec<SyntaxReference> {
        let SymbolRef::Declared(index) = &self.reference else {
            return Vec::new();
        };
        self.data().symbols[*index]
            .declarations
            .iter()
            .map(|&site| SyntaxReference {
                compilation: self.compilation.clone(),
                site,
            })
            .collect()
    }

    /// Source locations of the symbol's name in each declaration.
    pub fn locations(&self) -> Vec<Location> {
        self.declaring_syntax_references()
            .iter()
            .filter_map(|reference| {
                let node = reference.syntax()?;
                let range = name_range(&node).unwrap_or(reference.site.range);
                self.data().location(&reference.site, range)
            })
            .collect()
    }

    /// Raw XML of the documentation comment on the first declaration.
    pub fn documentation_comment_xml(&self) -> Option<String> {
        self.declaring_syntax_references().iter().find_map(|reference| {
            let node = reference.syntax()?;
            let documented = match node.kind() {
                SyntaxKind::VARIABLE_DECLARATOR => node.parent()?,
                _ => node,
            };
            prism_compiler_parser::doc::doc_comment_xml(&documented)
        })
    }

    pub fn to_display_string(&self, format: DisplayFormat) -> String {
        display_symbol(self, format)
    }
}

fn name_range(node: &SyntaxNode) -> Option<TextRange> {
    let token = if let Some(member) = MemberDecl::cast(node.clone()) {
        member.name_token()
    } else if let Some(declarator) = VariableDeclarator::cast(node.clone()) {
        declarator.name_token()
    } else if let Some(param) = Param::cast(node.clone()) {
        param.name_token()
    } else {
        TypeParam::cast(node.clone()).and_then(|param| param.name_token())
    };
    token.map(|token| token.text_range())
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.compilation == other.compilation && self.reference == other.reference
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compilation.hash(state);
        self.reference.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string(DisplayFormat::Qualified))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({self})", self.kind())
    }
}

/// One declaration of a symbol: a node in one of the compilation's trees.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxReference {
    compilation: Compilation,
    site: DeclSite,
}

impl SyntaxReference {
    pub fn syntax(&self) -> Option<SyntaxNode> {
        self.compilation.data().node_at(&self.site)
    }

    pub fn file_path(&self) -> Arc<str> {
        self.compilation.data().files[self.site.file].path.clone()
    }

    pub fn span(&self) -> TextRange {
        self.site.range
    }

    pub fn kind(&self) -> SyntaxKind {
        self.site.kind
    }

    pub fn location(&self) -> Option<Location> {
        self.compilation.data().location(&self.site, self.site.range)
    }
}

impl fmt::Debug for SyntaxReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxReference")
            .field("file", &self.file_path())
            .field("kind", &self.site.kind)
            .field("range", &self.site.range)
            .finish()
    }
}
