//! Naming, accessibility, modifier and classification facts.

use prism_compiler_parser::ast::{AstNode, HasModifiers, MemberDecl};
use prism_compiler_parser::SyntaxKind;
use prism_compiler_semantic::{
    Accessibility, DisplayFormat, NullableAnnotation, SpecialType, SymbolKind, SyntaxReference, TypeKind,
};
use smol_str::SmolStr;

use super::ValidSymbol;
use crate::naming;

impl ValidSymbol {
    // ---- Identity ----------------------------------------------------------------

    pub fn name(&self) -> SmolStr {
        self.symbol.name()
    }

    /// The name with a `` `N `` arity suffix for generic types.
    pub fn metadata_name(&self) -> String {
        self.symbol.metadata_name()
    }

    pub fn kind(&self) -> SymbolKind {
        self.symbol.kind()
    }

    /// Dotted name of the enclosing namespace; `None` at global scope.
    pub fn namespace(&self) -> Option<String> {
        self.symbol
            .containing_namespace()
            .filter(|namespace| !namespace.is_global_namespace())
            .map(|namespace| namespace.to_display_string(DisplayFormat::Qualified))
    }

    /// `Shop.Orders.Cart<int>`
    pub fn fully_qualified_name(&self) -> String {
        self.symbol.to_display_string(DisplayFormat::Qualified)
    }

    /// `global::Shop.Orders.Cart<int>`
    pub fn global_qualified_name(&self) -> String {
        self.symbol.to_display_string(DisplayFormat::FullyQualified)
    }

    /// Dotted declared path without type arguments or keyword aliases:
    /// `System.Int32`, `Shop.Outer.Inner`.
    pub fn declared_path(&self) -> String {
        let mut segments = vec![self.name().to_string()];
        let mut current = self.symbol.containing_type();
        while let Some(outer) = current {
            segments.push(outer.name().to_string());
            current = outer.containing_type();
        }
        if let Some(namespace) = self.namespace() {
            segments.push(namespace);
        }
        segments.reverse();
        segments.join(".")
    }

    /// `Cart<int>`
    pub fn display_name(&self) -> String {
        self.symbol.to_display_string(DisplayFormat::Minimal)
    }

    /// The name as a property would be called, PascalCased. Interfaces lose their
    /// `I` prefix: `IOrderStore` -> `OrderStore`.
    pub fn property_name(&self) -> String {
        naming::property_name(&self.base_name())
    }

    /// The name as a parameter would be called: `IOrderStore` -> `orderStore`.
    pub fn parameter_name(&self) -> String {
        naming::parameter_name(&self.base_name())
    }

    fn base_name(&self) -> SmolStr {
        let name = self.name();
        if self.is_interface() {
            SmolStr::new(naming::strip_interface_prefix(&name))
        } else {
            name
        }
    }

    // ---- Accessibility -----------------------------------------------------------

    pub fn accessibility(&self) -> Accessibility {
        self.symbol.declared_accessibility()
    }

    pub fn is_public(&self) -> bool {
        self.accessibility() == Accessibility::Public
    }

    pub fn is_internal(&self) -> bool {
        self.accessibility() == Accessibility::Internal
    }

    pub fn is_protected(&self) -> bool {
        self.accessibility() == Accessibility::Protected
    }

    pub fn is_private(&self) -> bool {
        self.accessibility() == Accessibility::Private
    }

    /// `protected internal`
    pub fn is_protected_or_internal(&self) -> bool {
        self.accessibility() == Accessibility::ProtectedOrInternal
    }

    /// `private protected`
    pub fn is_protected_and_internal(&self) -> bool {
        self.accessibility() == Accessibility::ProtectedAndInternal
    }

    /// The accessibility as written in source. Compound levels use the order C#
    /// itself prints them in. Empty for symbols without accessibility.
    pub fn accessibility_keyword(&self) -> &'static str {
        match self.accessibility() {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
            Accessibility::ProtectedOrInternal => "protected internal",
            Accessibility::ProtectedAndInternal => "private protected",
            Accessibility::NotApplicable => "",
        }
    }

    // ---- Modifiers ---------------------------------------------------------------

    pub fn is_static(&self) -> bool {
        self.symbol.is_static()
    }

    pub fn is_abstract(&self) -> bool {
        self.symbol.is_abstract()
    }

    pub fn is_sealed(&self) -> bool {
        self.symbol.is_sealed()
    }

    pub fn is_virtual(&self) -> bool {
        self.symbol.is_virtual()
    }

    pub fn is_override(&self) -> bool {
        self.symbol.is_override()
    }

    pub fn is_extern(&self) -> bool {
        self.symbol.is_extern()
    }

    pub fn is_implicitly_declared(&self) -> bool {
        self.symbol.is_implicitly_declared()
    }

    pub fn is_async(&self) -> bool {
        self.symbol.is_async()
    }

    pub fn is_const(&self) -> bool {
        self.symbol.is_const()
    }

    /// A `readonly` field, a property without a setter or a `readonly` struct.
    pub fn is_readonly(&self) -> bool {
        match self.kind() {
            SymbolKind::Field => self.symbol.is_readonly(),
            SymbolKind::Property => !self.symbol.has_setter(),
            SymbolKind::NamedType => self.is_struct() && self.symbol.is_readonly(),
            _ => false,
        }
    }

    /// Whether any declaration of the symbol is written with `partial`.
    pub fn is_partial(&self) -> bool {
        self.symbol
            .declaring_syntax_references()
            .iter()
            .filter_map(SyntaxReference::syntax)
            .filter_map(MemberDecl::cast)
            .any(|decl| decl.has_modifier(SyntaxKind::PARTIAL_KW))
    }

    // ---- Classification ----------------------------------------------------------

    pub fn is_type(&self) -> bool {
        self.symbol.is_type()
    }

    pub fn is_namespace(&self) -> bool {
        self.kind() == SymbolKind::Namespace
    }

    pub fn is_method(&self) -> bool {
        self.kind() == SymbolKind::Method
    }

    pub fn is_generic(&self) -> bool {
        self.symbol.arity() > 0
    }

    pub fn is_value_type(&self) -> bool {
        self.symbol.is_value_type()
    }

    pub fn is_reference_type(&self) -> bool {
        self.symbol.is_reference_type()
    }

    pub fn type_kind(&self) -> Option<TypeKind> {
        self.symbol.type_kind()
    }

    pub fn is_interface(&self) -> bool {
        self.type_kind() == Some(TypeKind::Interface)
    }

    pub fn is_class(&self) -> bool {
        self.type_kind() == Some(TypeKind::Class)
    }

    pub fn is_struct(&self) -> bool {
        self.type_kind() == Some(TypeKind::Struct)
    }

    pub fn is_record(&self) -> bool {
        self.symbol.is_record()
    }

    pub fn is_enum(&self) -> bool {
        self.type_kind() == Some(TypeKind::Enum)
    }

    pub fn is_delegate(&self) -> bool {
        self.type_kind() == Some(TypeKind::Delegate)
    }

    /// `string?` as well as `int?`.
    pub fn is_nullable_annotated(&self) -> bool {
        self.symbol.nullable_annotation() == NullableAnnotation::Annotated
            || self.symbol.original_definition().special_type() == Some(SpecialType::Nullable)
    }

    pub fn special_type(&self) -> Option<SpecialType> {
        self.symbol.special_type()
    }

    /// The declaration keyword: `record struct` and `record` take precedence over
    /// `struct` and `class`. Non-type symbols name their kind.
    pub fn kind_keyword(&self) -> &'static str {
        match self.kind() {
            SymbolKind::NamedType => match (self.type_kind(), self.is_record()) {
                (Some(TypeKind::Struct), true) => "record struct",
                (Some(TypeKind::Class), true) => "record",
                (Some(TypeKind::Class), false) => "class",
                (Some(TypeKind::Struct), false) => "struct",
                (Some(TypeKind::Interface), _) => "interface",
                (Some(TypeKind::Enum), _) => "enum",
                (Some(TypeKind::Delegate), _) => "delegate",
                _ => "type",
            },
            SymbolKind::Namespace => "namespace",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Field => "field",
            SymbolKind::Parameter => "parameter",
            SymbolKind::TypeParameter => "type parameter",
            SymbolKind::ArrayType => "array",
            SymbolKind::ErrorType => "error",
        }
    }
}
