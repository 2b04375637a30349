//! # Symbol Projections
//!
//! A symbol lookup can come back empty in two distinct ways: nothing was found, or
//! the compiler produced an error symbol for a name it could not bind. Both make an
//! [`OptionalSymbol`] empty, and both are checked before a [`ValidSymbol`] exists.
//!
//! [`ValidSymbol`] exposes the derived facts generators ask about: naming,
//! accessibility, modifiers, classification, hierarchy, generics, task-likeness,
//! attributes and documentation. Facts are computed on demand from the compilation.
//!
//! Equality is semantic identity: two wrappers are equal when they denote the same
//! declared entity, however each was obtained.

mod attributes;
mod facts;
mod hierarchy;

use std::fmt;

use prism_common::{Optional, Projection, Validation};
use prism_compiler_semantic::Symbol;

pub use hierarchy::{AllInterfaces, BaseTypes};

#[derive(Clone)]
enum Lookup {
    Missing,
    Found(Symbol),
    /// The compiler answered with an error symbol.
    Error(Symbol),
}

/// A symbol that may be missing or unresolved.
#[must_use]
#[derive(Clone)]
pub struct OptionalSymbol {
    lookup: Lookup,
}

impl OptionalSymbol {
    pub const fn empty() -> Self {
        Self {
            lookup: Lookup::Missing,
        }
    }

    pub fn new(symbol: Option<Symbol>) -> Self {
        let lookup = match symbol {
            None => Lookup::Missing,
            Some(symbol) if symbol.is_error() => Lookup::Error(symbol),
            Some(symbol) => Lookup::Found(symbol),
        };
        Self { lookup }
    }

    /// Whether the lookup produced an error symbol rather than nothing at all.
    pub fn is_error(&self) -> bool {
        matches!(self.lookup, Lookup::Error(_))
    }

    /// The underlying symbol, error symbols included.
    pub fn raw(&self) -> Option<&Symbol> {
        match &self.lookup {
            Lookup::Missing => None,
            Lookup::Found(symbol) | Lookup::Error(symbol) => Some(symbol),
        }
    }

    fn into_valid(self) -> Option<ValidSymbol> {
        match self.lookup {
            Lookup::Found(symbol) => Some(ValidSymbol { symbol }),
            Lookup::Missing | Lookup::Error(_) => None,
        }
    }

    /// Applies `f` to the validated symbol. `f` is never called when empty.
    pub fn map<R>(self, f: impl FnOnce(ValidSymbol) -> R) -> Optional<R> {
        Optional::from(self.into_valid().map(f))
    }

    /// Alias of [`OptionalSymbol::map`].
    pub fn select<R>(self, f: impl FnOnce(ValidSymbol) -> R) -> Optional<R> {
        self.map(f)
    }

    pub fn and_then(self, f: impl FnOnce(ValidSymbol) -> OptionalSymbol) -> OptionalSymbol {
        match self.into_valid() {
            Some(valid) => f(valid),
            None => Self::empty(),
        }
    }

    /// Keeps the symbol only if `predicate` holds for it.
    pub fn filter(self, predicate: impl FnOnce(&ValidSymbol) -> bool) -> Self {
        let keep = match &self.lookup {
            Lookup::Found(symbol) => predicate(&ValidSymbol::from_ref(symbol)),
            Lookup::Missing | Lookup::Error(_) => false,
        };
        if keep {
            self
        } else {
            Self::empty()
        }
    }

    pub fn match_value<R>(
        self,
        on_present: impl FnOnce(ValidSymbol) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        match self.into_valid() {
            Some(valid) => on_present(valid),
            None => on_absent(),
        }
    }

    pub fn match_do(self, on_present: impl FnOnce(ValidSymbol), on_absent: impl FnOnce()) {
        self.match_value(on_present, on_absent);
    }
}

impl Default for OptionalSymbol {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Symbol> for OptionalSymbol {
    fn from(symbol: Symbol) -> Self {
        Self::new(Some(symbol))
    }
}

impl From<Option<Symbol>> for OptionalSymbol {
    fn from(symbol: Option<Symbol>) -> Self {
        Self::new(symbol)
    }
}

impl From<ValidSymbol> for OptionalSymbol {
    fn from(valid: ValidSymbol) -> Self {
        Self {
            lookup: Lookup::Found(valid.symbol),
        }
    }
}

impl Projection for OptionalSymbol {
    type Value = Symbol;

    const WHAT: &'static str = "symbol";

    fn has_value(&self) -> bool {
        matches!(self.lookup, Lookup::Found(_))
    }

    fn or_null(self) -> Option<Symbol> {
        self.into_valid().map(ValidSymbol::into_symbol)
    }
}

impl Validation for OptionalSymbol {
    type Valid = ValidSymbol;

    fn validate(self) -> Option<ValidSymbol> {
        self.into_valid()
    }
}

impl fmt::Debug for OptionalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lookup {
            Lookup::Missing => f.write_str("OptionalSymbol(<missing>)"),
            Lookup::Found(symbol) => write!(f, "OptionalSymbol({symbol:?})"),
            Lookup::Error(symbol) => write!(f, "OptionalSymbol(<error {symbol}>)"),
        }
    }
}

/// A symbol known to be present and resolved.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValidSymbol {
    symbol: Symbol,
}

impl ValidSymbol {
    /// Validates `symbol` directly.
    pub fn new(symbol: Symbol) -> Option<Self> {
        OptionalSymbol::from(symbol).validate()
    }

    fn from_ref(symbol: &Symbol) -> Self {
        Self {
            symbol: symbol.clone(),
        }
    }

    /// Wraps each resolved symbol; error symbols are dropped.
    pub(crate) fn collect(symbols: impl IntoIterator<Item = Symbol>) -> Vec<Self> {
        symbols.into_iter().filter_map(Self::new).collect()
    }

    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn into_symbol(self) -> Symbol {
        self.symbol
    }

    /// Back to the optional form, for chaining.
    pub fn to_optional(&self) -> OptionalSymbol {
        OptionalSymbol::from(self.clone())
    }
}

impl fmt::Display for ValidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.symbol, f)
    }
}

impl fmt::Debug for ValidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Valid{:?}", self.symbol)
    }
}

impl PartialEq<Symbol> for ValidSymbol {
    fn eq(&self, other: &Symbol) -> bool {
        &self.symbol == other
    }
}
