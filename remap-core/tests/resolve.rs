//! Descriptor resolution over hand-written shapes.

use std::any::{Any, TypeId};
use std::sync::Arc;
use std::thread;

use remap_core::{
    Def, DescriptorCache, Field, Kind, Remap, ResolveError, Shape, StructDef, Timestamp, shape_of,
};

#[derive(Debug, Default, PartialEq)]
struct Employee {
    name: String,
    position: String,
}

fn employee_name(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Employee>()?.name as &dyn Any)
}

fn employee_name_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Employee>()?.name as &mut dyn Any)
}

fn employee_position(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Employee>()?.position as &dyn Any)
}

fn employee_position_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Employee>()?.position as &mut dyn Any)
}

impl Remap for Employee {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<Employee>,
        type_identifier: "Employee",
        def: Def::Struct(StructDef {
            fields: &[
                Field {
                    name: "name",
                    rename: None,
                    shape: shape_of::<String>,
                    get: employee_name,
                    get_mut: employee_name_mut,
                },
                Field {
                    name: "position",
                    rename: Some("job_title,omitempty"),
                    shape: shape_of::<String>,
                    get: employee_position,
                    get_mut: employee_position_mut,
                },
            ],
        }),
    };
}

#[derive(Debug, Default)]
struct Roster {
    members: Vec<Employee>,
    lead: Option<Employee>,
    updated_at: Timestamp,
    headcount: u32,
}

fn roster_members(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Roster>()?.members as &dyn Any)
}

fn roster_members_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Roster>()?.members as &mut dyn Any)
}

fn roster_lead(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Roster>()?.lead as &dyn Any)
}

fn roster_lead_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Roster>()?.lead as &mut dyn Any)
}

fn roster_updated_at(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Roster>()?.updated_at as &dyn Any)
}

fn roster_updated_at_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Roster>()?.updated_at as &mut dyn Any)
}

fn roster_headcount(this: &dyn Any) -> Option<&dyn Any> {
    Some(&this.downcast_ref::<Roster>()?.headcount as &dyn Any)
}

fn roster_headcount_mut(this: &mut dyn Any) -> Option<&mut dyn Any> {
    Some(&mut this.downcast_mut::<Roster>()?.headcount as &mut dyn Any)
}

impl Remap for Roster {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<Roster>,
        type_identifier: "Roster",
        def: Def::Struct(StructDef {
            fields: &[
                Field {
                    name: "members",
                    rename: None,
                    shape: shape_of::<Vec<Employee>>,
                    get: roster_members,
                    get_mut: roster_members_mut,
                },
                Field {
                    name: "lead",
                    rename: None,
                    shape: shape_of::<Option<Employee>>,
                    get: roster_lead,
                    get_mut: roster_lead_mut,
                },
                Field {
                    name: "updated_at",
                    rename: Some("updatedAt"),
                    shape: shape_of::<Timestamp>,
                    get: roster_updated_at,
                    get_mut: roster_updated_at_mut,
                },
                Field {
                    name: "headcount",
                    rename: None,
                    shape: shape_of::<u32>,
                    get: roster_headcount,
                    get_mut: roster_headcount_mut,
                },
            ],
        }),
    };
}

static_assertions::assert_impl_all!(DescriptorCache: Send, Sync);

#[test]
fn fields_keep_declaration_order_and_tags() {
    let cache = DescriptorCache::new();
    let descriptor = cache.resolve::<Employee>().unwrap();

    assert_eq!(descriptor.kind(), Kind::Struct);
    let keys: Vec<_> = descriptor
        .fields()
        .iter()
        .map(|f| (f.name(), f.lookup_key(), f.kind()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("name", "name", Kind::StringScalar),
            ("position", "job_title", Kind::StringScalar),
        ]
    );
    assert!(descriptor.field("job_title").is_some());
    assert!(descriptor.field("job_title,omitempty").is_none());
}

#[test]
fn nested_kinds_are_resolved() {
    let cache = DescriptorCache::new();
    let roster = cache.resolve::<Roster>().unwrap();

    let kinds: Vec<_> = roster.fields().iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        vec![Kind::Sequence, Kind::Pointer, Kind::Temporal, Kind::NumericScalar]
    );

    let members = roster.field("members").unwrap().descriptor();
    let element = members.element().unwrap();
    assert_eq!(element.kind(), Kind::Struct);
    assert_eq!(element.shape().type_identifier, "Employee");

    let lead = roster.field("lead").unwrap().descriptor();
    assert!(Arc::ptr_eq(lead.element().unwrap(), element));
    assert!(roster.field("updatedAt").is_some());
}

#[test]
fn descriptors_are_published_once() {
    let cache = DescriptorCache::new();
    assert!(cache.is_empty());

    let first = cache.resolve::<Roster>().unwrap();
    let published = cache.len();
    let second = cache.resolve::<Roster>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), published);
    assert!(cache.get(TypeId::of::<Employee>()).is_some());
}

#[test]
fn concurrent_first_use_agrees_on_one_descriptor() {
    let cache = Arc::new(DescriptorCache::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.resolve::<Roster>().unwrap())
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for descriptor in &resolved[1..] {
        assert!(Arc::ptr_eq(&resolved[0], descriptor));
    }
}

#[test]
fn scalar_roots_are_rejected() {
    let cache = DescriptorCache::new();
    assert_eq!(
        cache.resolve::<u32>().unwrap_err(),
        ResolveError::InvalidDestinationKind {
            type_identifier: "u32",
            kind: Kind::NumericScalar,
        }
    );
    assert!(matches!(
        cache.resolve::<Timestamp>(),
        Err(ResolveError::InvalidDestinationKind {
            kind: Kind::Temporal,
            ..
        })
    ));
    assert!(cache.resolve::<Vec<u32>>().is_ok());
    assert!(cache.resolve::<Option<Employee>>().is_ok());
}

#[test]
fn separate_caches_do_not_share() {
    let a = DescriptorCache::new();
    let b = DescriptorCache::new();
    let from_a = a.resolve::<Employee>().unwrap();
    let from_b = b.resolve::<Employee>().unwrap();
    assert!(!Arc::ptr_eq(&from_a, &from_b));
}

#[test]
fn field_accessors_reach_the_right_slot() {
    let mut employee = Employee::default();
    let Def::Struct(def) = Employee::SHAPE.def else {
        panic!("Employee is a struct");
    };
    let slot = (def.fields[1].get_mut)(&mut employee).unwrap();
    *slot.downcast_mut::<String>().unwrap() = "Eng".to_string();
    assert_eq!(employee.position, "Eng");

    let mut not_an_employee = 0u8;
    assert!((def.fields[0].get_mut)(&mut not_an_employee).is_none());
}
