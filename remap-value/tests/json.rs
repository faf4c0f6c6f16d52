use remap_value::{Mapping, Number, UntypedValue, ValueType, value};

#[test]
fn json_integers_keep_integer_ness() {
    let v: UntypedValue =
        serde_json::from_str("[3600, 3600.0, -1, 18446744073709551615]").unwrap();
    let items = v.as_sequence().unwrap();
    assert!(items[0].as_number().unwrap().is_integer());
    assert!(items[1].as_number().unwrap().is_f64());
    assert_eq!(items[2].as_number().and_then(Number::as_i64), Some(-1));
    assert_eq!(items[3].as_number().and_then(Number::as_u64), Some(u64::MAX));
}

#[test]
fn builds_from_iterators() {
    let seq: UntypedValue = (1..=3).map(UntypedValue::from).collect();
    assert_eq!(seq, value!([1, 2, 3]));

    let map: UntypedValue = [("a", value!(true)), ("b", value!(null))]
        .into_iter()
        .collect();
    assert_eq!(map, value!({"a": true, "b": null}));
    assert_eq!(map.get("b").map(UntypedValue::value_type), Some(ValueType::Null));
}

#[test]
fn conversions_from_rust_values() {
    assert_eq!(UntypedValue::from(None::<i32>), UntypedValue::Null);
    assert_eq!(UntypedValue::from(Some("x")), value!("x"));
    assert_eq!(UntypedValue::from(f64::NAN), UntypedValue::Null);
    assert_eq!(UntypedValue::from(Mapping::new()), value!({}));
}

#[test]
fn displays_as_compact_json() {
    let v = value!({"name": "Ann", "tags": ["a", 1, -2.5, null, false]});
    assert_eq!(v.to_string(), r#"{"name":"Ann","tags":["a",1,-2.5,null,false]}"#);
}
