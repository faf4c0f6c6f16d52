//! Numbers that remember whether they were written as integers.

use core::fmt;

#[derive(Clone, Copy, PartialEq)]
enum N {
    PosInt(u64),
    /// Always negative.
    NegInt(i64),
    /// Always finite.
    Float(f64),
}

/// A numeric scalar.
///
/// Integers are kept exact; floats are always finite.
#[derive(Clone, Copy, PartialEq)]
pub struct Number(N);

impl Number {
    /// Creates a number from a float, or `None` if it is NaN or infinite.
    pub fn from_f64(f: f64) -> Option<Self> {
        f.is_finite().then_some(Number(N::Float(f)))
    }

    /// Returns true if this number was an integer.
    pub fn is_integer(&self) -> bool {
        !matches!(self.0, N::Float(_))
    }

    /// Returns true if this number was a float.
    pub fn is_f64(&self) -> bool {
        matches!(self.0, N::Float(_))
    }

    /// Returns the number as an `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
            N::Float(_) => None,
        }
    }

    /// Returns the number as a `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            N::PosInt(u) => Some(u),
            N::NegInt(_) | N::Float(_) => None,
        }
    }

    /// Returns the number as an `f64`, possibly losing precision.
    pub fn as_f64(&self) -> f64 {
        match self.0 {
            N::PosInt(u) => u as f64,
            N::NegInt(i) => i as f64,
            N::Float(f) => f,
        }
    }

    /// Returns the number as an integer, dropping any fractional part.
    ///
    /// Floats are truncated toward zero (`3.9` gives `3`, `-3.9` gives `-3`)
    /// and saturate at the bounds of `i128`.
    pub fn to_i128_truncated(&self) -> i128 {
        match self.0 {
            N::PosInt(u) => i128::from(u),
            N::NegInt(i) => i128::from(i),
            N::Float(f) => f as i128,
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    let v = v as i64;
                    if v < 0 {
                        Number(N::NegInt(v))
                    } else {
                        Number(N::PosInt(v as u64))
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number(N::PosInt(v as u64))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            N::PosInt(u) => write!(f, "Number({u})"),
            N::NegInt(i) => write!(f, "Number({i})"),
            N::Float(x) => write!(f, "Number({x:?})"),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            N::PosInt(u) => write!(f, "{u}"),
            N::NegInt(i) => write!(f, "{i}"),
            N::Float(x) => write!(f, "{x}"),
        }
    }
}

impl serde::Serialize for Number {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            N::PosInt(u) => serializer.serialize_u64(u),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(x) => serializer.serialize_f64(x),
        }
    }
}
