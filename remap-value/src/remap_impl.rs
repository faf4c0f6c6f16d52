use core::any::TypeId;

use remap_core::{Def, Remap, Shape};

use crate::UntypedValue;

/// Fields of this type receive the untyped value verbatim.
impl Remap for UntypedValue {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<UntypedValue>,
        type_identifier: "UntypedValue",
        def: Def::Dynamic,
    };
}
