//! Attributes, documentation, members and declarations of a symbol.

use prism_common::{Optional, Validation};
use prism_compiler_diagnostics::Location;
use prism_compiler_parser::ast::AstNode;
use prism_compiler_semantic::{SyntaxReference, TypedConstant};
use tracing::warn;

use super::{OptionalSymbol, ValidSymbol};
use crate::attribute::{OptionalAttribute, ValidAttribute};
use crate::documentation::Documentation;
use crate::query::{AttributeQuery, FactoryError, QueryFactory};
use crate::syntax::{OptionalSyntax, ValidSyntax};

impl ValidSymbol {
    // ---- Attributes --------------------------------------------------------------

    /// Applied attributes in declaration order. Applications whose class did not
    /// resolve are left out.
    pub fn attributes(&self) -> Vec<ValidAttribute> {
        self.symbol
            .attributes()
            .into_iter()
            .filter_map(|data| {
                let valid = ValidAttribute::new(data.clone());
                if valid.is_none() {
                    warn!(
                        symbol = %self.symbol,
                        class = %data.attribute_class(),
                        "skipping attribute with unresolved class"
                    );
                }
                valid
            })
            .collect()
    }

    /// Applications of the attribute called `name`, written with or without its
    /// `Attribute` suffix, simple or qualified.
    pub fn attributes_named(&self, name: &str) -> Vec<ValidAttribute> {
        self.attributes()
            .into_iter()
            .filter(|attribute| attribute.is_named(name))
            .collect()
    }

    /// The first application of `name`.
    pub fn get_attribute(&self, name: &str) -> OptionalAttribute {
        self.attributes_named(name)
            .into_iter()
            .next()
            .map_or_else(OptionalAttribute::empty, OptionalAttribute::from)
    }

    /// Stops at the first match; unresolved applications are passed over silently.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.symbol
            .attributes()
            .into_iter()
            .filter_map(ValidAttribute::new)
            .any(|attribute| attribute.is_named(name))
    }

    pub fn lacks_attribute(&self, name: &str) -> bool {
        !self.has_attribute(name)
    }

    /// Every application of `Q`'s attribute, each built into a `Q`.
    pub fn attributes_of<Q: AttributeQuery>(&self) -> Result<Vec<Q>, FactoryError> {
        self.attributes_named(Q::ATTRIBUTE_NAME)
            .into_iter()
            .map(|attribute| QueryFactory::global().query::<Q>(attribute))
            .collect()
    }

    pub fn has_attribute_of<Q: AttributeQuery>(&self) -> bool {
        self.has_attribute(Q::ATTRIBUTE_NAME)
    }

    pub fn lacks_attribute_of<Q: AttributeQuery>(&self) -> bool {
        self.lacks_attribute(Q::ATTRIBUTE_NAME)
    }

    // ---- Documentation -----------------------------------------------------------

    /// Raw XML of the `///` comment, `None` when undocumented.
    pub fn documentation_xml(&self) -> Option<String> {
        self.symbol.documentation_comment_xml()
    }

    pub fn documentation(&self) -> Optional<Documentation> {
        Optional::from(
            self.documentation_xml()
                .and_then(|xml| Documentation::parse(&xml)),
        )
    }

    // ---- Members -----------------------------------------------------------------

    pub fn members(&self) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.members())
    }

    pub fn members_named(&self, name: &str) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.get_members(name))
    }

    /// The first member called `name`.
    pub fn get_member(&self, name: &str) -> OptionalSymbol {
        self.symbol.get_members(name).into_iter().next().into()
    }

    /// Return type of a method or delegate.
    pub fn return_type(&self) -> OptionalSymbol {
        self.symbol.return_type().into()
    }

    /// Type of a field, property, parameter or enum member.
    pub fn value_type(&self) -> OptionalSymbol {
        self.symbol.ty().into()
    }

    pub fn parameters(&self) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.parameters())
    }

    pub fn enum_underlying_type(&self) -> OptionalSymbol {
        self.symbol.enum_underlying_type().into()
    }

    /// Value of a `const` field or an enum member.
    pub fn constant_value(&self) -> Optional<TypedConstant> {
        Optional::from(
            self.symbol
                .constant_value()
                .filter(|constant| !constant.is_error())
                .cloned(),
        )
    }

    // ---- Declarations ------------------------------------------------------------

    pub fn locations(&self) -> Vec<Location> {
        self.symbol.locations()
    }

    /// The location of the first declaration.
    pub fn location(&self) -> Optional<Location> {
        Optional::from(self.locations().into_iter().next())
    }

    /// The first declaring node that is an `N`.
    pub fn declaring_syntax<N: AstNode>(&self) -> OptionalSyntax<N> {
        OptionalSyntax::new(
            self.symbol
                .declaring_syntax_references()
                .iter()
                .filter_map(SyntaxReference::syntax)
                .find_map(N::cast),
        )
    }

    /// Declaring nodes that are `N`s, one per partial declaration.
    pub fn declaring_syntaxes<N: AstNode>(&self) -> Vec<ValidSyntax<N>> {
        self.symbol
            .declaring_syntax_references()
            .iter()
            .filter_map(SyntaxReference::syntax)
            .filter_map(N::cast)
            .map(ValidSyntax::new)
            .collect()
    }
}

impl OptionalSymbol {
    /// Attribute lookup on a symbol that may be missing.
    pub fn get_attribute(self, name: &str) -> OptionalAttribute {
        match self.validate() {
            Some(symbol) => symbol.get_attribute(name),
            None => OptionalAttribute::empty(),
        }
    }
}
