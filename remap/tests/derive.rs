use remap::{Def, DescriptorCache, Kind, Remap, Timestamp, UntypedValue, from_value, value};

#[derive(Debug, Default, PartialEq, Remap)]
#[remap(rename_all = "camelCase")]
struct Meta {
    request_id: String,
    #[remap(rename = "request_app_id")]
    app_id: String,
    request_timestamp: Timestamp,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct Segment {
    current_partition: i32,
    total_partition: i32,
}

#[derive(Debug, Default, PartialEq, Remap)]
struct EventMessage {
    event_name: String,
    event_version: i32,
    segment: Segment,
    meta: Meta,
    #[remap(rename = "payload,omitempty")]
    payload: UntypedValue,
    #[remap(skip)]
    topic: String,
    r#type: String,
}

#[test]
fn shape_lists_fields_in_declaration_order() {
    let Def::Struct(def) = EventMessage::SHAPE.def else {
        panic!("expected a struct shape");
    };
    let names: Vec<_> = def.fields.iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["event_name", "event_version", "segment", "meta", "payload", "type"]
    );
    assert_eq!(EventMessage::SHAPE.type_identifier, "EventMessage");
    assert!(EventMessage::SHAPE.is_type::<EventMessage>());
}

#[test]
fn lookup_keys_follow_attributes() {
    let cache = DescriptorCache::new();
    let meta = cache.resolve::<Meta>().unwrap();
    let keys: Vec<_> = meta.fields().iter().map(|f| f.lookup_key()).collect();
    assert_eq!(keys, ["requestId", "request_app_id", "requestTimestamp"]);
    assert_eq!(meta.fields()[2].kind(), Kind::Temporal);

    let event = cache.resolve::<EventMessage>().unwrap();
    assert_eq!(event.field("payload").map(|f| f.kind()), Some(Kind::Dynamic));
    assert!(event.field("topic").is_none());
}

#[test]
fn skipped_fields_keep_their_default() {
    let event: EventMessage = from_value(&value!({
        "event_name": "test",
        "event_version": 2,
        "segment": {"current_partition": 1, "total_partition": 4},
        "meta": {
            "requestId": "r-1",
            "request_app_id": "APP",
            "requestTimestamp": "2024-03-01T09:30:00Z",
        },
        "topic": "ignored",
        "type": "created",
    }))
    .unwrap();

    assert_eq!(event.event_version, 2);
    assert_eq!(event.segment.total_partition, 4);
    assert_eq!(event.meta.app_id, "APP");
    assert!(!event.meta.request_timestamp.is_zero());
    assert!(event.payload.is_null());
    assert_eq!(event.topic, "");
    assert_eq!(event.r#type, "created");
}
