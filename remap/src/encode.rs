//! Encode any type implementing [`Remap`] back into an [`UntypedValue`].
//!
//! This is the inverse of [`crate::from_value`]: mapping the result back
//! into the same type yields an equal value.

use core::any::Any;

use crate::{
    Def, DescriptorCache, Kind, MapError, Mapping, Number, NumericType, Remap, ScalarDef,
    Timestamp, TypeDescriptor, UntypedValue,
};

/// Encodes `value` using the process-wide descriptor cache.
///
/// Structs become mappings keyed by lookup key, with every field present.
/// `None` becomes `null` and timestamps become RFC 3339 strings.
pub fn to_value<T: Remap>(value: &T) -> Result<UntypedValue, MapError> {
    to_value_with(value, DescriptorCache::global())
}

/// Encodes `value`, resolving descriptors through `cache`.
pub fn to_value_with<T: Remap>(
    value: &T,
    cache: &DescriptorCache,
) -> Result<UntypedValue, MapError> {
    let descriptor = cache.resolve::<T>()?;
    encode(value, &descriptor)
}

fn encode(value: &dyn Any, descriptor: &TypeDescriptor) -> Result<UntypedValue, MapError> {
    let mismatch = || MapError::AccessorMismatch {
        type_identifier: descriptor.shape().type_identifier,
    };

    match (descriptor.kind(), descriptor.shape().def) {
        (Kind::Struct, _) => {
            let mut mapping = Mapping::with_capacity(descriptor.fields().len());
            for field in descriptor.fields() {
                let inner = (field.field().get)(value).ok_or_else(mismatch)?;
                let encoded = encode(inner, field.descriptor())
                    .map_err(|err| err.in_field(field.lookup_key()))?;
                mapping.insert(field.lookup_key().to_owned(), encoded);
            }
            Ok(UntypedValue::Mapping(mapping))
        }
        (Kind::Sequence, Def::List(list)) => {
            let element = descriptor.element().ok_or_else(mismatch)?;
            let len = (list.len)(value).ok_or_else(mismatch)?;
            let mut items = Vec::with_capacity(len);
            for index in 0..len {
                let item = (list.get)(value, index).ok_or_else(mismatch)?;
                items.push(encode(item, element).map_err(|err| err.in_element(index))?);
            }
            Ok(UntypedValue::Sequence(items))
        }
        (Kind::Pointer, Def::Option(option)) => {
            let pointee = descriptor.element().ok_or_else(mismatch)?;
            match (option.get)(value) {
                Some(inner) => encode(inner, pointee),
                None => Ok(UntypedValue::Null),
            }
        }
        (Kind::NumericScalar, Def::Scalar(ScalarDef::Numeric(ty))) => {
            read_number(value, ty).ok_or_else(mismatch)
        }
        (Kind::StringScalar, _) => value
            .downcast_ref::<String>()
            .map(|s| UntypedValue::from(s.as_str()))
            .ok_or_else(mismatch),
        (Kind::BooleanScalar, _) => value
            .downcast_ref::<bool>()
            .map(|b| UntypedValue::from(*b))
            .ok_or_else(mismatch),
        (Kind::Temporal, _) => {
            let ts = value.downcast_ref::<Timestamp>().ok_or_else(mismatch)?;
            ts.to_rfc3339()
                .map(UntypedValue::from)
                .map_err(|source| MapError::TemporalFormatFailure { source })
        }
        (Kind::Dynamic, _) => value
            .downcast_ref::<UntypedValue>()
            .cloned()
            .ok_or_else(mismatch),
        _ => Err(mismatch()),
    }
}

/// Reads a numeric slot. Non-finite floats encode as `null`.
fn read_number(value: &dyn Any, ty: NumericType) -> Option<UntypedValue> {
    let number = match ty {
        NumericType::I8 => Number::from(*value.downcast_ref::<i8>()?),
        NumericType::I16 => Number::from(*value.downcast_ref::<i16>()?),
        NumericType::I32 => Number::from(*value.downcast_ref::<i32>()?),
        NumericType::I64 => Number::from(*value.downcast_ref::<i64>()?),
        NumericType::ISize => Number::from(*value.downcast_ref::<isize>()?),
        NumericType::U8 => Number::from(*value.downcast_ref::<u8>()?),
        NumericType::U16 => Number::from(*value.downcast_ref::<u16>()?),
        NumericType::U32 => Number::from(*value.downcast_ref::<u32>()?),
        NumericType::U64 => Number::from(*value.downcast_ref::<u64>()?),
        NumericType::USize => Number::from(*value.downcast_ref::<usize>()?),
        NumericType::F32 => return Some(UntypedValue::from(*value.downcast_ref::<f32>()?)),
        NumericType::F64 => return Some(UntypedValue::from(*value.downcast_ref::<f64>()?)),
    };
    Some(UntypedValue::from(number))
}
