//! Extraction of typed values from attribute arguments.

use prism_common::{EnumSource, EnumValue, EquatableArray, Optional, Projection};
use prism_compiler_semantic::{Compilation, ConstantValue, TypedConstant};
use smol_str::SmolStr;

use crate::symbol::ValidSymbol;

/// A Rust type an attribute argument can be read as.
///
/// Conversion succeeds only when the constant's runtime value is assignable to the
/// type: integers must fit, `f32` accepts only single-precision constants, and
/// `null` converts to nothing.
pub trait FromTypedConstant: Sized {
    fn from_typed_constant(constant: &TypedConstant, compilation: &Compilation) -> Option<Self>;
}

macro_rules! impl_from_typed_constant_for_ints {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromTypedConstant for $ty {
                fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
                    match constant.value {
                        ConstantValue::I32(_)
                        | ConstantValue::U32(_)
                        | ConstantValue::I64(_)
                        | ConstantValue::U64(_) => {
                            constant.value.as_i128().and_then(|value| <$ty>::try_from(value).ok())
                        }
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_typed_constant_for_ints!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromTypedConstant for bool {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        match constant.value {
            ConstantValue::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl FromTypedConstant for char {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        match constant.value {
            ConstantValue::Char(value) => Some(value),
            _ => None,
        }
    }
}

impl FromTypedConstant for f32 {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        match constant.value {
            ConstantValue::F32(value) => Some(value),
            _ => None,
        }
    }
}

impl FromTypedConstant for f64 {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        match constant.value {
            ConstantValue::F32(value) => Some(value.into()),
            ConstantValue::F64(value) => Some(value),
            _ => None,
        }
    }
}

impl FromTypedConstant for SmolStr {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        match &constant.value {
            ConstantValue::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromTypedConstant for String {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        constant.as_str().map(str::to_string)
    }
}

/// A `typeof(...)` argument.
impl FromTypedConstant for ValidSymbol {
    fn from_typed_constant(constant: &TypedConstant, compilation: &Compilation) -> Option<Self> {
        let ty = constant.as_type()?;
        ValidSymbol::new(compilation.symbol(ty.clone()))
    }
}

/// The constant itself, whatever its type.
impl FromTypedConstant for TypedConstant {
    fn from_typed_constant(constant: &TypedConstant, _: &Compilation) -> Option<Self> {
        (!constant.is_error()).then(|| constant.clone())
    }
}

/// An array whose every element converts.
impl<T: FromTypedConstant> FromTypedConstant for Vec<T> {
    fn from_typed_constant(constant: &TypedConstant, compilation: &Compilation) -> Option<Self> {
        constant
            .values()?
            .iter()
            .map(|element| T::from_typed_constant(element, compilation))
            .collect()
    }
}

impl<T: FromTypedConstant> FromTypedConstant for EquatableArray<T> {
    fn from_typed_constant(constant: &TypedConstant, compilation: &Compilation) -> Option<Self> {
        Vec::<T>::from_typed_constant(constant, compilation).map(EquatableArray::from)
    }
}

/// One attribute argument read as `T`: empty when the argument is absent or its
/// value is not assignable to `T`.
#[must_use]
#[derive(Debug, Clone)]
pub struct OptionalArgument<T>(Optional<T>);

impl<T> OptionalArgument<T> {
    pub const fn empty() -> Self {
        Self(Optional::empty())
    }

    pub const fn with_value(value: T) -> Self {
        Self(Optional::with_value(value))
    }

    pub fn into_optional(self) -> Optional<T> {
        self.0
    }

    pub const fn value(&self) -> Option<&T> {
        self.0.value()
    }

    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> OptionalArgument<R> {
        OptionalArgument(self.0.map(f))
    }

    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        Self(self.0.filter(predicate))
    }

    pub fn or_default(self, value: T) -> T {
        self.0.or_default(value)
    }

    pub fn or_default_with(self, value: impl FnOnce() -> T) -> T {
        self.0.or_default_with(value)
    }

    pub fn match_value<R>(
        self,
        on_present: impl FnOnce(T) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        self.0.match_value(on_present, on_absent)
    }

    pub fn match_do(self, on_present: impl FnOnce(T), on_absent: impl FnOnce()) {
        self.0.match_do(on_present, on_absent);
    }

    pub fn try_get_value(self, value: &mut Option<T>) -> bool {
        self.0.try_get_value(value)
    }

    /// Inverted [`OptionalArgument::try_get_value`]: `true` when MISSING.
    pub fn is_missing(self, value: &mut Option<T>) -> bool {
        self.0.is_missing(value)
    }
}

impl<T: FromTypedConstant> OptionalArgument<T> {
    pub(crate) fn read(constant: Option<&TypedConstant>, compilation: &Compilation) -> Self {
        Self(Optional::from(
            constant.and_then(|constant| T::from_typed_constant(constant, compilation)),
        ))
    }
}

impl<T: EnumSource> OptionalArgument<T> {
    /// Coerces an integer or string argument into the enumerant it encodes.
    pub fn to_enum<E: EnumValue>(self) -> Optional<E> {
        self.0.to_enum()
    }
}

impl<T> Default for OptionalArgument<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Projection for OptionalArgument<T> {
    type Value = T;

    const WHAT: &'static str = "argument";

    fn has_value(&self) -> bool {
        self.0.has_value()
    }

    fn or_null(self) -> Option<T> {
        self.0.into_option()
    }
}

impl<T> From<OptionalArgument<T>> for Optional<T> {
    fn from(argument: OptionalArgument<T>) -> Self {
        argument.0
    }
}

impl<T: PartialEq> PartialEq<T> for OptionalArgument<T> {
    fn eq(&self, other: &T) -> bool {
        self.0 == *other
    }
}
