//! # Attribute Projections
//!
//! An [`OptionalAttribute`] is an attribute application that may be missing. A
//! [`ValidAttribute`] is one whose class resolved; reading its arguments never
//! fails, it yields [`OptionalArgument`]s that are empty when an argument was not
//! written or holds a value of another type.

mod argument;

use std::fmt;

use prism_common::{Optional, Projection, Validation};
use prism_compiler_parser::ast::Attribute;
use prism_compiler_semantic::{AttributeData, TypedConstant};
use smol_str::SmolStr;

pub use argument::{FromTypedConstant, OptionalArgument};

use crate::naming;
use crate::symbol::{OptionalSymbol, ValidSymbol};
use crate::syntax::OptionalSyntax;

/// An attribute application that may be missing or unresolved.
#[must_use]
#[derive(Clone, Default)]
pub struct OptionalAttribute {
    data: Option<AttributeData>,
}

impl OptionalAttribute {
    pub const fn empty() -> Self {
        Self { data: None }
    }

    pub const fn new(data: Option<AttributeData>) -> Self {
        Self { data }
    }

    pub fn map<R>(self, f: impl FnOnce(ValidAttribute) -> R) -> Optional<R> {
        Optional::from(self.validate().map(f))
    }

    /// Alias of [`OptionalAttribute::map`].
    pub fn select<R>(self, f: impl FnOnce(ValidAttribute) -> R) -> Optional<R> {
        self.map(f)
    }

    pub fn and_then<R>(self, f: impl FnOnce(ValidAttribute) -> Optional<R>) -> Optional<R> {
        match self.validate() {
            Some(valid) => f(valid),
            None => Optional::empty(),
        }
    }

    pub fn filter(self, predicate: impl FnOnce(&ValidAttribute) -> bool) -> Self {
        match self.validate() {
            Some(valid) if predicate(&valid) => valid.into(),
            _ => Self::empty(),
        }
    }

    pub fn constructor_arg<T: FromTypedConstant>(&self, index: usize) -> OptionalArgument<T> {
        self.as_valid()
            .map_or_else(OptionalArgument::empty, |valid| valid.constructor_arg(index))
    }

    pub fn named_arg<T: FromTypedConstant>(&self, name: &str) -> OptionalArgument<T> {
        self.as_valid()
            .map_or_else(OptionalArgument::empty, |valid| valid.named_arg(name))
    }

    pub fn match_value<R>(
        self,
        on_present: impl FnOnce(ValidAttribute) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        match self.validate() {
            Some(valid) => on_present(valid),
            None => on_absent(),
        }
    }

    pub fn match_do(self, on_present: impl FnOnce(ValidAttribute), on_absent: impl FnOnce()) {
        self.match_value(on_present, on_absent);
    }

    fn as_valid(&self) -> Option<ValidAttribute> {
        self.data.clone().and_then(ValidAttribute::new)
    }
}

impl From<AttributeData> for OptionalAttribute {
    fn from(data: AttributeData) -> Self {
        Self::new(Some(data))
    }
}

impl From<Option<AttributeData>> for OptionalAttribute {
    fn from(data: Option<AttributeData>) -> Self {
        Self::new(data)
    }
}

impl From<ValidAttribute> for OptionalAttribute {
    fn from(valid: ValidAttribute) -> Self {
        Self::new(Some(valid.data))
    }
}

impl Projection for OptionalAttribute {
    type Value = AttributeData;

    const WHAT: &'static str = "attribute";

    fn has_value(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| !data.attribute_class().is_error())
    }

    fn or_null(self) -> Option<AttributeData> {
        self.validate().map(ValidAttribute::into_data)
    }
}

impl Validation for OptionalAttribute {
    type Valid = ValidAttribute;

    fn validate(self) -> Option<ValidAttribute> {
        self.data.and_then(ValidAttribute::new)
    }
}

impl fmt::Debug for OptionalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) => write!(f, "OptionalAttribute({data:?})"),
            None => f.write_str("OptionalAttribute(<missing>)"),
        }
    }
}

/// An attribute application whose class resolved.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValidAttribute {
    data: AttributeData,
    class: ValidSymbol,
}

impl ValidAttribute {
    /// `None` when the attribute class did not bind.
    pub fn new(data: AttributeData) -> Option<Self> {
        let class = ValidSymbol::new(data.attribute_class())?;
        Some(Self { data, class })
    }

    pub const fn data(&self) -> &AttributeData {
        &self.data
    }

    pub fn into_data(self) -> AttributeData {
        self.data
    }

    pub const fn attribute_class(&self) -> &ValidSymbol {
        &self.class
    }

    /// Class name as declared: `ConfigAttribute`.
    pub fn name(&self) -> SmolStr {
        self.class.name()
    }

    /// Class name as usually written at the application site: `Config`.
    pub fn short_name(&self) -> SmolStr {
        let name = self.name();
        SmolStr::new(naming::strip_attribute_suffix(&name))
    }

    /// `Acme.ConfigAttribute`
    pub fn full_name(&self) -> String {
        self.class.fully_qualified_name()
    }

    /// Matches the class by simple or qualified name, with or without the
    /// `Attribute` suffix.
    pub fn is_named(&self, name: &str) -> bool {
        self.short_name() == name
            || self.class.has_name(name)
            || naming::strip_attribute_suffix(&self.full_name()) == name
    }

    /// The constructor the application bound to; empty when no overload matched.
    pub fn constructor(&self) -> OptionalSymbol {
        self.data.constructor().into()
    }

    pub fn constructor_args(&self) -> &[TypedConstant] {
        self.data.constructor_args()
    }

    pub fn named_args(&self) -> &[(SmolStr, TypedConstant)] {
        self.data.named_args()
    }

    /// Positional argument `index`, defaults of optional parameters included.
    pub fn constructor_arg<T: FromTypedConstant>(&self, index: usize) -> OptionalArgument<T> {
        OptionalArgument::read(self.constructor_args().get(index), self.data.compilation())
    }

    /// The `Name = value` argument called `name`.
    pub fn named_arg<T: FromTypedConstant>(&self, name: &str) -> OptionalArgument<T> {
        OptionalArgument::read(self.data.named_arg(name), self.data.compilation())
    }

    /// Type argument `index` of a generic attribute class: `T` of `[Handler<T>]`.
    pub fn get_type_argument(&self, index: usize) -> OptionalSymbol {
        self.class.get_type_argument(index)
    }

    /// Builds a value from the whole application in one step.
    pub fn map<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        f(self)
    }

    /// Builds a value from the raw positional and named arguments.
    pub fn with_args<R>(
        &self,
        f: impl FnOnce(&[TypedConstant], &[(SmolStr, TypedConstant)]) -> R,
    ) -> R {
        f(self.constructor_args(), self.named_args())
    }

    /// `[ConnectionString]` suggests `ConnectionString`.
    pub fn suggested_property_name(&self) -> String {
        naming::property_name(&self.short_name())
    }

    /// `[ConnectionString]` suggests `connectionString`.
    pub fn suggested_parameter_name(&self) -> String {
        naming::parameter_name(&self.short_name())
    }

    /// The `[...]` entry in source; empty for attributes without one.
    pub fn application_syntax(&self) -> OptionalSyntax<Attribute> {
        OptionalSyntax::from_node(self.data.application_syntax())
    }
}

impl fmt::Display for ValidAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Debug for ValidAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Valid{:?}", self.data)
    }
}
