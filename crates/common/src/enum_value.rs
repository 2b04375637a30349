//! Coercion of raw integers and strings into named enumerants.
//!
//! Compilers commonly store enum-typed metadata arguments as their underlying integer.
//! [`EnumSource`] is implemented for the integer types and for strings, [`EnumValue`]
//! for every enum that derives `num_derive::FromPrimitive` and implements `FromStr`.

use std::str::FromStr;

use num_traits::FromPrimitive;

/// A type whose values can be recovered from a discriminant or a name.
pub trait EnumValue: Sized {
    /// Returns the enumerant with this discriminant, or `None` if it is not defined.
    fn from_discriminant(value: i64) -> Option<Self>;

    /// Returns the enumerant with this name, or `None` if it does not parse.
    fn from_name(name: &str) -> Option<Self>;
}

impl<E: FromPrimitive + FromStr> EnumValue for E {
    fn from_discriminant(value: i64) -> Option<Self> {
        E::from_i64(value)
    }

    fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }
}

/// A raw value that may encode an enumerant.
pub trait EnumSource {
    fn to_enum_value<E: EnumValue>(&self) -> Option<E>;
}

macro_rules! impl_enum_source_for_ints {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnumSource for $ty {
                fn to_enum_value<E: EnumValue>(&self) -> Option<E> {
                    i64::try_from(*self).ok().and_then(E::from_discriminant)
                }
            }
        )*
    };
}

impl_enum_source_for_ints!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl EnumSource for str {
    fn to_enum_value<E: EnumValue>(&self) -> Option<E> {
        // Numeric strings name the discriminant, matching how enum parsing usually works.
        E::from_name(self).or_else(|| {
            self.trim()
                .parse::<i64>()
                .ok()
                .and_then(E::from_discriminant)
        })
    }
}

impl EnumSource for String {
    fn to_enum_value<E: EnumValue>(&self) -> Option<E> {
        self.as_str().to_enum_value()
    }
}

impl<T: EnumSource + ?Sized> EnumSource for &T {
    fn to_enum_value<E: EnumValue>(&self) -> Option<E> {
        (**self).to_enum_value()
    }
}
