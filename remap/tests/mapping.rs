use remap::{
    DescriptorCache, MapError, Remap, Timestamp, UntypedValue, ValueType, from_value,
    from_value_with, map_value, to_value, value,
};
use remap_testhelpers::IPanic;

#[derive(Debug, Default, PartialEq, Remap)]
struct Employee {
    name: String,
    position: String,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct SetEmployeeReq {
    key: String,
    employee: Employee,
    expiry_time: i64,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct Item {
    id: i32,
    name: String,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct Counter {
    count: i32,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct Member {
    name: String,
    joined_at: Timestamp,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct Team {
    title: String,
    employees: Vec<Member>,
    lead: Option<Member>,
}

#[test]
fn maps_nested_structs() -> Result<(), IPanic> {
    remap_testhelpers::setup();

    let body = value!({
        "key": "E1",
        "employee": {"name": "Ann", "position": "Eng"},
        "expiry_time": 3600.0,
    });
    let req: SetEmployeeReq = from_value(&body)?;
    assert_eq!(
        req,
        SetEmployeeReq {
            key: "E1".into(),
            employee: Employee {
                name: "Ann".into(),
                position: "Eng".into(),
            },
            expiry_time: 3600,
        }
    );
    Ok(())
}

#[test]
fn maps_sequences_in_order() -> Result<(), IPanic> {
    remap_testhelpers::setup();

    let body = value!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
    let items: Vec<Item> = from_value(&body)?;
    assert_eq!(
        items,
        vec![
            Item {
                id: 1,
                name: "a".into()
            },
            Item {
                id: 2,
                name: "b".into()
            },
        ]
    );
    Ok(())
}

#[test]
fn mismatched_scalars_keep_the_default() -> Result<(), IPanic> {
    remap_testhelpers::setup();

    let counter: Counter = from_value(&value!({"count": true}))?;
    assert_eq!(counter.count, 0);

    let counter: Counter = from_value(&value!({"count": "5"}))?;
    assert_eq!(counter.count, 0);

    let employee: Employee = from_value(&value!({"name": 7, "position": ["x"]}))?;
    assert_eq!(employee, Employee::default());
    Ok(())
}

#[test]
fn integers_truncate_toward_zero() -> Result<(), IPanic> {
    let counter: Counter = from_value(&value!({"count": 3.9}))?;
    assert_eq!(counter.count, 3);
    let counter: Counter = from_value(&value!({"count": -3.9}))?;
    assert_eq!(counter.count, -3);
    Ok(())
}

#[test]
fn missing_and_unknown_keys_are_ignored() -> Result<(), IPanic> {
    let req: SetEmployeeReq = from_value(&value!({"key": "E2", "unexpected": {"deep": 1}}))?;
    assert_eq!(req.key, "E2");
    assert_eq!(req.employee, Employee::default());
    assert_eq!(req.expiry_time, 0);
    Ok(())
}

#[test]
fn null_pointers_stay_unset() -> Result<(), IPanic> {
    let team: Team = from_value(&value!({"lead": null}))?;
    assert_eq!(team.lead, None);

    let team: Team = from_value(&value!({"lead": {"name": "Bo"}}))?;
    assert_eq!(team.lead.map(|m| m.name), Some("Bo".to_string()));

    let maybe: Option<Vec<Item>> = from_value(&UntypedValue::Null)?;
    assert_eq!(maybe, None);
    Ok(())
}

#[test]
fn parses_timestamps() -> Result<(), IPanic> {
    let member: Member = from_value(&value!({"joined_at": "2024-03-01T09:30:00+07:00"}))?;
    assert_eq!(
        member.joined_at,
        Timestamp::parse_rfc3339("2024-03-01T02:30:00Z")?
    );

    let member: Member = from_value(&value!({"joined_at": null}))?;
    assert!(member.joined_at.is_zero());
    Ok(())
}

#[test]
fn unparsable_timestamps_fail_and_keep_zero() {
    let mut member = Member::default();
    let err = map_value(
        &mut member,
        &value!({"name": "Ann", "joined_at": "not-a-date"}),
        &DescriptorCache::new(),
    )
    .unwrap_err();

    assert_eq!(err.path(), ".joined_at");
    assert!(matches!(
        err.root_cause(),
        MapError::TemporalParseFailure { input, .. } if input == "not-a-date"
    ));
    assert!(member.joined_at.is_zero());
    // Fields before the failure stay assigned.
    assert_eq!(member.name, "Ann");

    let err = from_value::<Member>(&value!({"joined_at": ""})).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MapError::TemporalParseFailure { .. }
    ));

    let err = from_value::<Member>(&value!({"joined_at": 1700000000})).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MapError::TypeMismatch {
            got: ValueType::Number,
            ..
        }
    ));
}

#[test]
fn element_failures_carry_the_index_and_stop_appending() {
    let mut team = Team::default();
    let err = map_value(
        &mut team,
        &value!({
            "title": "core",
            "employees": [
                {"name": "a", "joined_at": "2024-03-01T00:00:00Z"},
                {"name": "b", "joined_at": "soon"},
                {"name": "c"},
            ],
        }),
        &DescriptorCache::new(),
    )
    .unwrap_err();

    assert_eq!(err.path(), ".employees[1].joined_at");
    insta::assert_snapshot!(
        err.to_string(),
        @r#"at .employees[1].joined_at: cannot parse "soon" as an RFC 3339 timestamp"#
    );
    assert_eq!(team.title, "core");
    assert_eq!(team.employees.len(), 1);
    assert_eq!(team.employees[0].name, "a");
}

#[test]
fn containers_require_matching_input() {
    let err = from_value::<SetEmployeeReq>(&value!([1, 2])).unwrap_err();
    assert!(matches!(
        err,
        MapError::TypeMismatch {
            got: ValueType::Sequence,
            ..
        }
    ));
    assert_eq!(err.path(), "<root>");

    let err = from_value::<Vec<Item>>(&value!({"id": 1})).unwrap_err();
    assert!(matches!(
        err,
        MapError::TypeMismatch {
            got: ValueType::Mapping,
            ..
        }
    ));

    let err = from_value::<Team>(&value!({"lead": [1]})).unwrap_err();
    assert_eq!(err.path(), ".lead");
}

#[test]
fn null_sequences_stay_empty() -> Result<(), IPanic> {
    let team: Team = from_value(&value!({"title": "core", "employees": null}))?;
    assert_eq!(team.title, "core");
    assert!(team.employees.is_empty());

    let items: Vec<Item> = from_value(&UntypedValue::Null)?;
    assert!(items.is_empty());

    // Structs still need a mapping.
    let err = from_value::<SetEmployeeReq>(&value!({"employee": null})).unwrap_err();
    assert_eq!(err.path(), ".employee");
    assert!(matches!(
        err.root_cause(),
        MapError::TypeMismatch {
            got: ValueType::Null,
            ..
        }
    ));
    Ok(())
}

#[test]
fn scalar_roots_are_rejected() {
    let err = from_value::<i32>(&value!(1)).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid destination kind: `i32` is a number, expected a struct, sequence or pointer"
    );
    assert!(matches!(err, MapError::InvalidDestinationKind { .. }));
    assert!(from_value::<Timestamp>(&value!("2024-03-01T00:00:00Z")).is_err());
}

#[test]
fn dynamic_fields_keep_the_raw_value() -> Result<(), IPanic> {
    #[derive(Debug, Default, Remap)]
    struct Event {
        event_name: String,
        #[remap(rename = "payload,omitempty")]
        payload: UntypedValue,
    }

    let payload = value!({"anything": [1, "two", null]});
    let event: Event = from_value(&value!({"event_name": "test", "payload": (payload.clone())}))?;
    assert_eq!(event.event_name, "test");
    assert_eq!(event.payload, payload);
    Ok(())
}

#[test]
fn round_trips_through_the_untyped_form() -> Result<(), IPanic> {
    let team = Team {
        title: "core".into(),
        employees: vec![
            Member {
                name: "a".into(),
                joined_at: Timestamp::parse_rfc3339("2024-03-01T09:30:00+07:00")?,
            },
            Member::default(),
        ],
        lead: Some(Member {
            name: "lead".into(),
            joined_at: Timestamp::ZERO,
        }),
    };

    let encoded = to_value(&team)?;
    assert_eq!(
        encoded.get("employees").and_then(|e| e.as_sequence()).map(<[_]>::len),
        Some(2)
    );
    let decoded: Team = from_value(&encoded)?;
    assert_eq!(decoded, team);

    let cache = DescriptorCache::new();
    let text = serde_json::to_string(&encoded)?;
    let reparsed: UntypedValue = serde_json::from_str(&text)?;
    assert_eq!(from_value_with::<Team>(&reparsed, &cache)?, team);
    Ok(())
}
