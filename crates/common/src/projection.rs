//! # Projection & Validation Contracts
//!
//! Every optional wrapper in Prism implements [`Projection`]. Wrappers that have a
//! validated counterpart (symbols, syntax nodes, attributes) also implement [`Validation`].
//!
//! No method of either contract partially succeeds: it yields the whole value, yields
//! absence, or fails with a [`ProjectionError`].

use std::borrow::Cow;

/// Failure raised at an explicit `or_throw` / `validate_or_throw` boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("{what} has no value")]
    Empty { what: &'static str },

    #[error("{what} is missing or could not be resolved")]
    Invalid { what: &'static str },

    #[error("{0}")]
    Message(Cow<'static, str>),
}

/// The minimal shape of an optional wrapper.
pub trait Projection: Sized {
    /// The wrapped value.
    type Value;

    /// Noun used in default failure messages.
    const WHAT: &'static str = "value";

    fn has_value(&self) -> bool;

    fn is_empty(&self) -> bool {
        !self.has_value()
    }

    /// Returns the value, or `None` when empty. Never fails.
    fn or_null(self) -> Option<Self::Value>;

    /// Returns the value, or a [`ProjectionError::Empty`] when empty.
    fn or_throw(self) -> Result<Self::Value, ProjectionError> {
        self.or_null()
            .ok_or(ProjectionError::Empty { what: Self::WHAT })
    }

    /// Returns the value, or fails with `message` when empty.
    fn or_throw_msg(
        self,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<Self::Value, ProjectionError> {
        match self.or_null() {
            Some(value) => Ok(value),
            None => Err(ProjectionError::Message(message.into())),
        }
    }

    /// Returns the value, or fails with the message produced by `message`.
    ///
    /// `message` is only called on the failure path.
    fn or_throw_with<M, F>(self, message: F) -> Result<Self::Value, ProjectionError>
    where
        F: FnOnce() -> M,
        M: Into<Cow<'static, str>>,
    {
        self.or_null()
            .ok_or_else(|| ProjectionError::Message(message().into()))
    }
}

/// The shape of an optional wrapper that can be narrowed into a validated form.
///
/// Two entry points exist for guard-style code and they have opposite polarity:
///
/// - [`Validation::try_validate`] returns `true` on success.
/// - [`Validation::is_not_valid`] returns `true` when the wrapper is EMPTY, so the
///   validated value is available after the early exit:
///
/// ```ignore
/// let mut valid = None;
/// if symbol.is_not_valid(&mut valid) {
///     return;
/// }
/// let valid = valid.unwrap();
/// ```
pub trait Validation: Projection {
    /// The validated counterpart.
    type Valid;

    /// Narrows into the validated form, or `None` when empty.
    fn validate(self) -> Option<Self::Valid>;

    fn validate_or_throw(self) -> Result<Self::Valid, ProjectionError> {
        self.validate()
            .ok_or(ProjectionError::Invalid { what: Self::WHAT })
    }

    fn validate_or_throw_msg(
        self,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<Self::Valid, ProjectionError> {
        match self.validate() {
            Some(valid) => Ok(valid),
            None => Err(ProjectionError::Message(message.into())),
        }
    }

    /// Like [`Validation::validate_or_throw_msg`], with the message built only on failure.
    fn validate_or_throw_with<M, F>(self, message: F) -> Result<Self::Valid, ProjectionError>
    where
        F: FnOnce() -> M,
        M: Into<Cow<'static, str>>,
    {
        self.validate()
            .ok_or_else(|| ProjectionError::Message(message().into()))
    }

    /// Writes the validated form into `valid` and returns `true`, or writes `None`
    /// and returns `false`.
    fn try_validate(self, valid: &mut Option<Self::Valid>) -> bool {
        *valid = self.validate();
        valid.is_some()
    }

    /// Inverted [`Validation::try_validate`]: `true` means EMPTY.
    ///
    /// In the `false` branch `valid` holds the validated form.
    fn is_not_valid(self, valid: &mut Option<Self::Valid>) -> bool {
        !self.try_validate(valid)
    }
}
