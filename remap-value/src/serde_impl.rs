//! Wire-side (de)serialization of the untyped value tree.

use core::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Mapping, Number, Scalar, UntypedValue};

impl Serialize for UntypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UntypedValue::Null => serializer.serialize_unit(),
            UntypedValue::Scalar(scalar) => scalar.serialize(serializer),
            UntypedValue::Sequence(items) => serializer.collect_seq(items),
            UntypedValue::Mapping(mapping) => serializer.collect_map(mapping),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

struct UntypedValueVisitor;

impl<'de> Visitor<'de> for UntypedValueVisitor {
    type Value = UntypedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any self-describing value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<UntypedValue, E> {
        Ok(UntypedValue::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<UntypedValue, E> {
        Ok(UntypedValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<UntypedValue, E> {
        Ok(UntypedValue::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<UntypedValue, E> {
        Number::from_f64(v)
            .map(UntypedValue::from)
            .ok_or_else(|| E::custom(format_args!("non-finite number {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<UntypedValue, E> {
        Ok(UntypedValue::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<UntypedValue, E> {
        Ok(UntypedValue::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<UntypedValue, E> {
        Ok(UntypedValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<UntypedValue, E> {
        Ok(UntypedValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<UntypedValue, D::Error> {
        UntypedValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<UntypedValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(UntypedValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UntypedValue, A::Error> {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, UntypedValue>()? {
            // Later duplicates replace earlier ones, keys stay unique.
            mapping.insert(key, value);
        }
        Ok(UntypedValue::Mapping(mapping))
    }
}

impl<'de> Deserialize<'de> for UntypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UntypedValueVisitor)
    }
}
