use core::fmt;

use indexmap::IndexMap;

use crate::Number;

/// String-keyed entries of a [`UntypedValue::Mapping`].
///
/// Keys are unique. Insertion order is kept for display only; lookups never
/// depend on it.
pub type Mapping = IndexMap<String, UntypedValue>;

/// The type of an [`UntypedValue`], for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `null`
    Null,
    /// A boolean scalar.
    Bool,
    /// A numeric scalar.
    Number,
    /// A string scalar.
    String,
    /// An ordered list of values.
    Sequence,
    /// String-keyed entries.
    Mapping,
}

impl ValueType {
    /// A short name for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Sequence => "sequence",
            ValueType::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A number, integer or float.
    Number(Number),
    /// A string.
    String(String),
    /// A boolean.
    Bool(bool),
}

impl Scalar {
    /// The type of this scalar.
    pub fn value_type(&self) -> ValueType {
        match self {
            Scalar::Number(_) => ValueType::Number,
            Scalar::String(_) => ValueType::String,
            Scalar::Bool(_) => ValueType::Bool,
        }
    }
}

/// A generically decoded payload: mappings, sequences, scalars and null.
///
/// This is what decoding a self-describing format without knowing the
/// destination type yields.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UntypedValue {
    /// The absence of a value.
    #[default]
    Null,
    /// A number, string or boolean.
    Scalar(Scalar),
    /// An ordered list of values.
    Sequence(Vec<UntypedValue>),
    /// String-keyed entries.
    Mapping(Mapping),
}

impl UntypedValue {
    /// The type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            UntypedValue::Null => ValueType::Null,
            UntypedValue::Scalar(scalar) => scalar.value_type(),
            UntypedValue::Sequence(_) => ValueType::Sequence,
            UntypedValue::Mapping(_) => ValueType::Mapping,
        }
    }

    /// Returns true if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, UntypedValue::Null)
    }

    /// Returns the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            UntypedValue::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[UntypedValue]> {
        match self {
            UntypedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the scalar if this is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            UntypedValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the string if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UntypedValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UntypedValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric scalar.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            UntypedValue::Scalar(Scalar::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Looks up `key` if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&UntypedValue> {
        self.as_mapping()?.get(key)
    }
}

impl fmt::Display for UntypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<bool> for UntypedValue {
    fn from(b: bool) -> Self {
        UntypedValue::Scalar(Scalar::Bool(b))
    }
}

impl From<&str> for UntypedValue {
    fn from(s: &str) -> Self {
        UntypedValue::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<String> for UntypedValue {
    fn from(s: String) -> Self {
        UntypedValue::Scalar(Scalar::String(s))
    }
}

impl From<Number> for UntypedValue {
    fn from(n: Number) -> Self {
        UntypedValue::Scalar(Scalar::Number(n))
    }
}

impl From<Scalar> for UntypedValue {
    fn from(scalar: Scalar) -> Self {
        UntypedValue::Scalar(scalar)
    }
}

impl From<Vec<UntypedValue>> for UntypedValue {
    fn from(items: Vec<UntypedValue>) -> Self {
        UntypedValue::Sequence(items)
    }
}

impl From<Mapping> for UntypedValue {
    fn from(mapping: Mapping) -> Self {
        UntypedValue::Mapping(mapping)
    }
}

impl<T: Into<UntypedValue>> From<Option<T>> for UntypedValue {
    fn from(option: Option<T>) -> Self {
        option.map_or(UntypedValue::Null, Into::into)
    }
}

/// Non-finite floats become `null`.
impl From<f64> for UntypedValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(UntypedValue::Null, UntypedValue::from)
    }
}

impl From<f32> for UntypedValue {
    fn from(f: f32) -> Self {
        UntypedValue::from(f64::from(f))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for UntypedValue {
                fn from(v: $t) -> Self {
                    UntypedValue::Scalar(Scalar::Number(Number::from(v)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromIterator<UntypedValue> for UntypedValue {
    fn from_iter<I: IntoIterator<Item = UntypedValue>>(iter: I) -> Self {
        UntypedValue::Sequence(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, UntypedValue)> for UntypedValue {
    fn from_iter<I: IntoIterator<Item = (K, UntypedValue)>>(iter: I) -> Self {
        UntypedValue::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
