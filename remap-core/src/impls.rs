//! `Remap` implementations for standard library types.

use core::any::{Any, TypeId};

use crate::{Def, ListDef, NumericType, OptionDef, Remap, ScalarDef, Shape, shape_of};

macro_rules! impl_numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Remap for $ty {
                const SHAPE: &'static Shape = &Shape {
                    id: TypeId::of::<$ty>,
                    type_identifier: stringify!($ty),
                    def: Def::Scalar(ScalarDef::Numeric(NumericType::$variant)),
                };
            }
        )*
    };
}

impl_numeric! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => USize,
    f32 => F32,
    f64 => F64,
}

impl Remap for String {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<String>,
        type_identifier: "String",
        def: Def::Scalar(ScalarDef::String),
    };
}

impl Remap for bool {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<bool>,
        type_identifier: "bool",
        def: Def::Scalar(ScalarDef::Bool),
    };
}

fn new_default<T: Remap>() -> Box<dyn Any> {
    Box::new(T::default())
}

impl<T: Remap> Remap for Vec<T> {
    const SHAPE: &'static Shape = &const {
        fn push<T: Remap>(list: &mut dyn Any, item: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
            let Some(list) = list.downcast_mut::<Vec<T>>() else {
                return Err(item);
            };
            list.push(*item.downcast::<T>()?);
            Ok(())
        }

        fn len<T: Remap>(list: &dyn Any) -> Option<usize> {
            list.downcast_ref::<Vec<T>>().map(Vec::len)
        }

        fn get<T: Remap>(list: &dyn Any, index: usize) -> Option<&dyn Any> {
            let item = list.downcast_ref::<Vec<T>>()?.get(index)?;
            Some(item as &dyn Any)
        }

        Shape {
            id: TypeId::of::<Vec<T>>,
            type_identifier: "Vec",
            def: Def::List(ListDef {
                item: shape_of::<T>,
                new_item: new_default::<T>,
                push: push::<T>,
                len: len::<T>,
                get: get::<T>,
            }),
        }
    };
}

impl<T: Remap> Remap for Option<T> {
    const SHAPE: &'static Shape = &const {
        fn attach<T: Remap>(option: &mut dyn Any, inner: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
            let Some(option) = option.downcast_mut::<Option<T>>() else {
                return Err(inner);
            };
            *option = Some(*inner.downcast::<T>()?);
            Ok(())
        }

        fn get<T: Remap>(option: &dyn Any) -> Option<&dyn Any> {
            let inner = option.downcast_ref::<Option<T>>()?.as_ref()?;
            Some(inner as &dyn Any)
        }

        Shape {
            id: TypeId::of::<Option<T>>,
            type_identifier: "Option",
            def: Def::Option(OptionDef {
                inner: shape_of::<T>,
                new_inner: new_default::<T>,
                attach: attach::<T>,
                get: get::<T>,
            }),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ops_round_through_erased_values() {
        let Def::List(list) = <Vec<u16>>::SHAPE.def else {
            panic!("Vec should have a list def");
        };
        let mut items: Vec<u16> = vec![1];

        let mut item = (list.new_item)();
        *item.downcast_mut::<u16>().unwrap() = 7;
        (list.push)(&mut items, item).unwrap();

        assert_eq!(items, vec![1, 7]);
        assert_eq!((list.len)(&items), Some(2));
        assert_eq!(
            (list.get)(&items, 1).and_then(|v| v.downcast_ref::<u16>()),
            Some(&7)
        );
        assert!((list.get)(&items, 2).is_none());
    }

    #[test]
    fn list_push_gives_back_mismatched_items() {
        let Def::List(list) = <Vec<u16>>::SHAPE.def else {
            panic!("Vec should have a list def");
        };
        let mut items: Vec<u16> = Vec::new();
        let rejected = (list.push)(&mut items, Box::new("nope"));
        assert!(rejected.is_err());
        assert!(items.is_empty());
    }

    #[test]
    fn option_attach_makes_some() {
        let Def::Option(option) = <Option<String>>::SHAPE.def else {
            panic!("Option should have an option def");
        };
        let mut value: Option<String> = None;
        assert!((option.get)(&value).is_none());

        let inner = (option.new_inner)();
        (option.attach)(&mut value, inner).unwrap();
        assert_eq!(value, Some(String::new()));
        assert!((option.get)(&value).is_some());
    }

    #[test]
    fn numeric_shapes_carry_their_type() {
        assert!(matches!(
            i32::SHAPE.def,
            Def::Scalar(ScalarDef::Numeric(NumericType::I32))
        ));
        assert!(f64::SHAPE.is_type::<f64>());
        assert_eq!(usize::SHAPE.type_identifier, "usize");
    }
}
