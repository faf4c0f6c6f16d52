use core::fmt;
use std::sync::Arc;

use crate::{Field, Shape};

/// How the mapper treats a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A struct filled from a mapping, field by field.
    Struct,
    /// A list filled from a sequence, element by element.
    Sequence,
    /// A nullable slot: `null` leaves it unset.
    Pointer,
    /// An integer or float.
    NumericScalar,
    /// A string.
    StringScalar,
    /// A boolean.
    BooleanScalar,
    /// A [`crate::Timestamp`], parsed from a string.
    Temporal,
    /// Holds the untyped value verbatim.
    Dynamic,
}

impl Kind {
    /// Returns true for the kinds a mapping call may start from.
    pub const fn is_addressable_composite(self) -> bool {
        matches!(self, Kind::Struct | Kind::Sequence | Kind::Pointer)
    }

    /// Returns true for numeric, string and boolean leaves.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::NumericScalar | Kind::StringScalar | Kind::BooleanScalar
        )
    }

    /// A short name for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Struct => "struct",
            Kind::Sequence => "sequence",
            Kind::Pointer => "pointer",
            Kind::NumericScalar => "number",
            Kind::StringScalar => "string",
            Kind::BooleanScalar => "boolean",
            Kind::Temporal => "timestamp",
            Kind::Dynamic => "dynamic value",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved, immutable description of a destination type.
///
/// Descriptors are produced by a [`crate::DescriptorCache`] and shared
/// through `Arc`s; nothing mutates them after they are published.
#[derive(Debug)]
pub struct TypeDescriptor {
    shape: &'static Shape,
    kind: Kind,
    fields: Vec<FieldDescriptor>,
    element: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub(crate) fn leaf(shape: &'static Shape, kind: Kind) -> Self {
        Self {
            shape,
            kind,
            fields: Vec::new(),
            element: None,
        }
    }

    pub(crate) fn with_fields(shape: &'static Shape, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            shape,
            kind: Kind::Struct,
            fields,
            element: None,
        }
    }

    pub(crate) fn with_element(
        shape: &'static Shape,
        kind: Kind,
        element: Arc<TypeDescriptor>,
    ) -> Self {
        Self {
            shape,
            kind,
            fields: Vec::new(),
            element: Some(element),
        }
    }

    /// The shape this descriptor was resolved from.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// How the mapper treats this type.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Struct fields in declaration order; empty for every other kind.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The element type of a sequence, or the pointee of a pointer.
    pub fn element(&self) -> Option<&Arc<TypeDescriptor>> {
        self.element.as_ref()
    }

    /// Finds a field by its lookup key.
    pub fn field(&self, lookup_key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.lookup_key == lookup_key)
    }
}

/// One struct field, resolved.
#[derive(Debug)]
pub struct FieldDescriptor {
    field: &'static Field,
    lookup_key: &'static str,
    descriptor: Arc<TypeDescriptor>,
}

impl FieldDescriptor {
    pub(crate) fn new(
        field: &'static Field,
        lookup_key: &'static str,
        descriptor: Arc<TypeDescriptor>,
    ) -> Self {
        Self {
            field,
            lookup_key,
            descriptor,
        }
    }

    /// The field's identifier in Rust source.
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    /// The key this field is looked up by in a mapping.
    pub fn lookup_key(&self) -> &'static str {
        self.lookup_key
    }

    /// The kind of the field's type.
    pub fn kind(&self) -> Kind {
        self.descriptor.kind
    }

    /// The descriptor of the field's type.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// The static field metadata, including its accessors.
    pub fn field(&self) -> &'static Field {
        self.field
    }
}

/// Derives the lookup key of a field: the tag up to its first comma, or the
/// field name when there is no tag.
pub fn lookup_key(field: &Field) -> &'static str {
    match field.rename {
        Some(tag) => tag.split(',').next().unwrap_or(tag),
        None => field.name,
    }
}
