//! Map an [`UntypedValue`] into any type implementing [`Remap`].
//!
//! The mapper walks the value tree and the destination's
//! [`TypeDescriptor`] side by side, filling the destination in place:
//!
//! ```
//! use remap::{Remap, from_value, value};
//!
//! #[derive(Debug, Default, PartialEq, Remap)]
//! struct Employee {
//!     name: String,
//!     position: String,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Remap)]
//! struct SetEmployee {
//!     key: String,
//!     employee: Employee,
//!     expiry_time: i64,
//! }
//!
//! let body = value!({
//!     "key": "E1",
//!     "employee": {"name": "Ann", "position": "Eng"},
//!     "expiry_time": 3600.0,
//! });
//! let request: SetEmployee = from_value(&body).unwrap();
//! assert_eq!(request.employee.name, "Ann");
//! assert_eq!(request.expiry_time, 3600);
//! ```
//!
//! Scalars are lenient: a value of the wrong scalar kind is discarded and the
//! field keeps its default. Containers are strict: a struct needs a mapping
//! and a sequence needs a sequence.

use core::any::Any;

use crate::{
    DescriptorCache, Kind, MapError, Number, NumericType, Remap, Scalar, ScalarDef, Timestamp,
    TypeDescriptor, UntypedValue, ValueType,
};
use crate::{Def, debug, trace};

/// What happened when a scalar was written into a scalar destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarOutcome {
    /// The value was converted and stored.
    Assigned,
    /// The value was of an incompatible kind and was dropped; the
    /// destination kept whatever it held before.
    Discarded {
        /// The destination's kind.
        expected: Kind,
        /// The input's type.
        got: ValueType,
    },
}

/// Maps `source` into `dest`, resolving descriptors through `cache`.
///
/// `dest` is filled in place. On error the call stops at the first failure
/// and whatever was assigned before it stays assigned; treat `dest` as
/// unusable afterwards.
pub fn map_value<T: Remap>(
    dest: &mut T,
    source: &UntypedValue,
    cache: &DescriptorCache,
) -> Result<(), MapError> {
    let descriptor = cache.resolve::<T>()?;
    map_into(dest, &descriptor, source)
}

/// Builds a `T` from `source`, using the process-wide descriptor cache.
pub fn from_value<T: Remap>(source: &UntypedValue) -> Result<T, MapError> {
    from_value_with(source, DescriptorCache::global())
}

/// Builds a `T` from `source`, resolving descriptors through `cache`.
pub fn from_value_with<T: Remap>(
    source: &UntypedValue,
    cache: &DescriptorCache,
) -> Result<T, MapError> {
    let mut dest = T::default();
    map_value(&mut dest, source, cache)?;
    Ok(dest)
}

/// Maps `source` into the type-erased `dest` described by `descriptor`.
pub(crate) fn map_into(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<(), MapError> {
    trace!(
        "map {} ({}) <- {}",
        descriptor.shape(),
        descriptor.kind(),
        source.value_type()
    );

    match descriptor.kind() {
        Kind::Struct => map_struct(dest, descriptor, source),
        Kind::Sequence => map_sequence(dest, descriptor, source),
        Kind::Pointer => map_pointer(dest, descriptor, source),
        Kind::NumericScalar | Kind::StringScalar | Kind::BooleanScalar => {
            if let ScalarOutcome::Discarded { expected, got } =
                assign_scalar(dest, descriptor, source)?
            {
                debug!(
                    "discarded {got} for {} destination `{}`",
                    expected,
                    descriptor.shape()
                );
            }
            Ok(())
        }
        Kind::Temporal => map_temporal(dest, descriptor, source),
        Kind::Dynamic => {
            let slot = downcast_slot::<UntypedValue>(dest, descriptor)?;
            *slot = source.clone();
            Ok(())
        }
    }
}

fn map_struct(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<(), MapError> {
    let UntypedValue::Mapping(mapping) = source else {
        return Err(MapError::TypeMismatch {
            expected: Kind::Struct,
            got: source.value_type(),
        });
    };

    for field in descriptor.fields() {
        let Some(value) = mapping.get(field.lookup_key()) else {
            trace!("`{}` absent, keeping default", field.lookup_key());
            continue;
        };
        let slot = (field.field().get_mut)(&mut *dest)
            .ok_or_else(|| accessor_mismatch(descriptor))?;
        map_into(slot, field.descriptor(), value)
            .map_err(|err| err.in_field(field.lookup_key()))?;
    }
    Ok(())
}

fn map_sequence(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<(), MapError> {
    let items = match source {
        UntypedValue::Sequence(items) => items,
        UntypedValue::Null => {
            trace!("null sequence, leaving it empty");
            return Ok(());
        }
        _ => {
            return Err(MapError::TypeMismatch {
                expected: Kind::Sequence,
                got: source.value_type(),
            });
        }
    };
    let (Def::List(list), Some(element)) = (descriptor.shape().def, descriptor.element()) else {
        return Err(accessor_mismatch(descriptor));
    };

    for (index, item) in items.iter().enumerate() {
        // Fill a fresh element first, so a failing element is never appended.
        let mut slot = (list.new_item)();
        map_into(&mut *slot, element, item).map_err(|err| err.in_element(index))?;
        (list.push)(&mut *dest, slot).map_err(|_| accessor_mismatch(descriptor))?;
    }
    Ok(())
}

fn map_pointer(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<(), MapError> {
    if source.is_null() {
        return Ok(());
    }
    let (Def::Option(option), Some(pointee)) = (descriptor.shape().def, descriptor.element())
    else {
        return Err(accessor_mismatch(descriptor));
    };

    let mut slot = (option.new_inner)();
    map_into(&mut *slot, pointee, source)?;
    (option.attach)(dest, slot).map_err(|_| accessor_mismatch(descriptor))
}

fn map_temporal(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<(), MapError> {
    match source {
        UntypedValue::Null => Ok(()),
        UntypedValue::Scalar(Scalar::String(input)) => {
            let parsed =
                Timestamp::parse_rfc3339(input).map_err(|source| MapError::TemporalParseFailure {
                    input: input.clone(),
                    source,
                })?;
            *downcast_slot::<Timestamp>(dest, descriptor)? = parsed;
            Ok(())
        }
        other => Err(MapError::TypeMismatch {
            expected: Kind::Temporal,
            got: other.value_type(),
        }),
    }
}

/// Writes a scalar into a numeric, string or boolean destination.
///
/// Mismatched kinds are not errors; they are reported as
/// [`ScalarOutcome::Discarded`] and leave `dest` untouched. Integer
/// destinations truncate toward zero and saturate at their bounds.
pub(crate) fn assign_scalar(
    dest: &mut dyn Any,
    descriptor: &TypeDescriptor,
    source: &UntypedValue,
) -> Result<ScalarOutcome, MapError> {
    let Def::Scalar(scalar_def) = descriptor.shape().def else {
        return Err(accessor_mismatch(descriptor));
    };

    match (scalar_def, source.as_scalar()) {
        (ScalarDef::Numeric(ty), Some(Scalar::Number(number))) => {
            write_number(dest, ty, number).ok_or_else(|| accessor_mismatch(descriptor))?;
        }
        (ScalarDef::String, Some(Scalar::String(s))) => {
            downcast_slot::<String>(dest, descriptor)?.clone_from(s);
        }
        (ScalarDef::Bool, Some(Scalar::Bool(b))) => {
            *downcast_slot::<bool>(dest, descriptor)? = *b;
        }
        _ => {
            return Ok(ScalarOutcome::Discarded {
                expected: descriptor.kind(),
                got: source.value_type(),
            });
        }
    }
    Ok(ScalarOutcome::Assigned)
}

macro_rules! saturating {
    ($value:expr => $ty:ty) => {{
        let value: i128 = $value;
        <$ty>::try_from(value).unwrap_or(if value < 0 { <$ty>::MIN } else { <$ty>::MAX })
    }};
}

fn write_number(dest: &mut dyn Any, ty: NumericType, number: &Number) -> Option<()> {
    let int = number.to_i128_truncated();
    match ty {
        NumericType::I8 => *dest.downcast_mut::<i8>()? = saturating!(int => i8),
        NumericType::I16 => *dest.downcast_mut::<i16>()? = saturating!(int => i16),
        NumericType::I32 => *dest.downcast_mut::<i32>()? = saturating!(int => i32),
        NumericType::I64 => *dest.downcast_mut::<i64>()? = saturating!(int => i64),
        NumericType::ISize => *dest.downcast_mut::<isize>()? = saturating!(int => isize),
        NumericType::U8 => *dest.downcast_mut::<u8>()? = saturating!(int => u8),
        NumericType::U16 => *dest.downcast_mut::<u16>()? = saturating!(int => u16),
        NumericType::U32 => *dest.downcast_mut::<u32>()? = saturating!(int => u32),
        NumericType::U64 => *dest.downcast_mut::<u64>()? = saturating!(int => u64),
        NumericType::USize => *dest.downcast_mut::<usize>()? = saturating!(int => usize),
        NumericType::F32 => *dest.downcast_mut::<f32>()? = number.as_f64() as f32,
        NumericType::F64 => *dest.downcast_mut::<f64>()? = number.as_f64(),
    }
    Some(())
}

fn downcast_slot<'a, T: Any>(
    dest: &'a mut dyn Any,
    descriptor: &TypeDescriptor,
) -> Result<&'a mut T, MapError> {
    dest.downcast_mut::<T>()
        .ok_or_else(|| accessor_mismatch(descriptor))
}

fn accessor_mismatch(descriptor: &TypeDescriptor) -> MapError {
    MapError::AccessorMismatch {
        type_identifier: descriptor.shape().type_identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn assign<T: Remap>(dest: &mut T, source: &UntypedValue) -> ScalarOutcome {
        let cache = DescriptorCache::new();
        let descriptor = cache.resolve_shape(T::SHAPE).unwrap();
        assign_scalar(dest, &descriptor, source).unwrap()
    }

    #[test]
    fn integers_truncate_toward_zero() {
        let mut n = 0i32;
        assert_eq!(assign(&mut n, &value!(3.9)), ScalarOutcome::Assigned);
        assert_eq!(n, 3);
        assert_eq!(assign(&mut n, &value!(-3.9)), ScalarOutcome::Assigned);
        assert_eq!(n, -3);
    }

    #[test]
    fn integers_saturate_at_their_bounds() {
        let mut small = 0u8;
        assign(&mut small, &value!(300));
        assert_eq!(small, u8::MAX);
        assign(&mut small, &value!(-1));
        assert_eq!(small, 0);

        let mut wide = 0i64;
        assign(&mut wide, &value!(1e300));
        assert_eq!(wide, i64::MAX);
    }

    #[test]
    fn floats_assign_directly() {
        let mut f = 0f64;
        assign(&mut f, &value!(2.5));
        assert_eq!(f, 2.5);
        assign(&mut f, &value!(7));
        assert_eq!(f, 7.0);
    }

    #[test]
    fn mismatched_scalars_are_discarded() {
        let mut n = 9u32;
        assert_eq!(
            assign(&mut n, &value!("5")),
            ScalarOutcome::Discarded {
                expected: Kind::NumericScalar,
                got: ValueType::String
            }
        );
        assert_eq!(n, 9);

        let mut s = String::from("kept");
        assert_eq!(
            assign(&mut s, &value!({"a": 1})),
            ScalarOutcome::Discarded {
                expected: Kind::StringScalar,
                got: ValueType::Mapping
            }
        );
        assert_eq!(s, "kept");

        let mut b = false;
        assert!(matches!(
            assign(&mut b, &value!(null)),
            ScalarOutcome::Discarded { .. }
        ));
        assert!(!b);
    }

    #[test]
    fn dynamic_slots_take_the_value_verbatim() {
        let cache = DescriptorCache::new();
        let mut dest: Vec<UntypedValue> = Vec::new();
        let source = value!([{"a": [1, null]}, "x"]);
        map_value(&mut dest, &source, &cache).unwrap();
        assert_eq!(UntypedValue::Sequence(dest), source);
    }
}
