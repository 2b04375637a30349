//! # Generic Optional Value Wrapper
//!
//! [`Optional<T>`] wraps an arbitrary value that may be absent and provides the small
//! functor/filter vocabulary the rest of Prism is built on: `map`, `filter`, enum
//! coercion, defaulting and exhaustive matching.
//!
//! ## Equality
//!
//! An `Optional<T>` compares equal to a bare `T` only when it holds a value equal to it.
//! Two `Optional<T>` values cannot be compared with `==`: "both empty" and "semantically
//! equal" are different questions, and the type refuses to pick one. Convert with
//! [`Optional::into_option`] when an `Option` comparison is really what is wanted.

use crate::enum_value::{EnumSource, EnumValue};
use crate::projection::Projection;

/// An optional value of any type.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Optional<T>(Option<T>);

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Optional<T> {
    pub const fn empty() -> Self {
        Self(None)
    }

    pub const fn with_value(value: T) -> Self {
        Self(Some(value))
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }

    pub const fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub const fn as_ref(&self) -> Optional<&T> {
        Optional(self.0.as_ref())
    }

    /// Applies `f` to the value. `f` is never called on an empty wrapper.
    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> Optional<R> {
        Optional(self.0.map(f))
    }

    /// Alias of [`Optional::map`].
    pub fn select<R>(self, f: impl FnOnce(T) -> R) -> Optional<R> {
        self.map(f)
    }

    pub fn and_then<R>(self, f: impl FnOnce(T) -> Optional<R>) -> Optional<R> {
        match self.0 {
            Some(value) => f(value),
            None => Optional::empty(),
        }
    }

    /// Keeps the value only if `predicate` holds for it.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        Self(self.0.filter(predicate))
    }

    pub fn or_default(self, value: T) -> T {
        self.0.unwrap_or(value)
    }

    /// Like [`Optional::or_default`], computing the fallback only when empty.
    pub fn or_default_with(self, value: impl FnOnce() -> T) -> T {
        self.0.unwrap_or_else(value)
    }

    /// Total extraction: exactly one of the branches runs.
    pub fn match_value<R>(
        self,
        on_present: impl FnOnce(T) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        match self.0 {
            Some(value) => on_present(value),
            None => on_absent(),
        }
    }

    /// Side-effecting sibling of [`Optional::match_value`].
    pub fn match_do(self, on_present: impl FnOnce(T), on_absent: impl FnOnce()) {
        self.match_value(on_present, on_absent);
    }

    /// Runs `f` on the value, if any, and returns the wrapper unchanged.
    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Some(value) = &self.0 {
            f(value);
        }
        self
    }

    /// Writes the value into `value` and returns `true` when present.
    pub fn try_get_value(self, value: &mut Option<T>) -> bool {
        *value = self.0;
        value.is_some()
    }

    /// Inverted [`Optional::try_get_value`]: returns `true` when the value is MISSING.
    pub fn is_missing(self, value: &mut Option<T>) -> bool {
        !self.try_get_value(value)
    }
}

impl<T: EnumSource> Optional<T> {
    /// Coerces an integer or string value into the enumerant it names.
    ///
    /// Empty when the integer is not a defined discriminant or the string does not parse.
    pub fn to_enum<E: EnumValue>(self) -> Optional<E> {
        self.and_then(|value| Optional(value.to_enum_value()))
    }
}

impl<T> Projection for Optional<T> {
    type Value = T;

    fn has_value(&self) -> bool {
        self.0.is_some()
    }

    fn or_null(self) -> Option<T> {
        self.0
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.0
    }
}

impl<T: PartialEq> PartialEq<T> for Optional<T> {
    fn eq(&self, other: &T) -> bool {
        matches!(&self.0, Some(value) if value == other)
    }
}
