use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::{
    Def, FieldDescriptor, Kind, Remap, ScalarDef, Shape, Timestamp, TypeDescriptor, lookup_key,
};

/// Errors produced while resolving a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The root of a mapping call must be a struct, a sequence or a pointer.
    InvalidDestinationKind {
        /// The offending type.
        type_identifier: &'static str,
        /// What it resolved to.
        kind: Kind,
    },
    /// The shape cannot be mapped at all.
    UnsupportedShape {
        /// The offending type.
        type_identifier: &'static str,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidDestinationKind {
                type_identifier,
                kind,
            } => write!(
                f,
                "invalid destination kind: `{type_identifier}` is a {kind}, expected a struct, sequence or pointer"
            ),
            ResolveError::UnsupportedShape { type_identifier } => {
                write!(f, "unsupported shape: `{type_identifier}` cannot be remapped")
            }
        }
    }
}

impl core::error::Error for ResolveError {}

static GLOBAL: LazyLock<DescriptorCache> = LazyLock::new(DescriptorCache::new);

/// Resolves shapes into [`TypeDescriptor`]s and remembers them.
///
/// Each type is resolved at most once per cache: the first descriptor
/// published for a [`TypeId`] wins, and every later lookup gets that same
/// `Arc`. Published descriptors are never modified or evicted, so a cache
/// can be shared freely between threads.
///
/// Descriptors are built outside the lock. Two threads racing on the same
/// type may both build one; only the first to publish is kept.
///
/// Destination types must be acyclic: resolving a type that contains itself
/// does not terminate.
#[derive(Default)]
pub struct DescriptorCache {
    descriptors: RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>,
}

impl DescriptorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache shared by the whole process.
    pub fn global() -> &'static DescriptorCache {
        &GLOBAL
    }

    /// Resolves `T` as the root of a mapping call.
    pub fn resolve<T: Remap>(&self) -> Result<Arc<TypeDescriptor>, ResolveError> {
        self.resolve_root(T::SHAPE)
    }

    /// Resolves `shape` as the root of a mapping call.
    ///
    /// Fails with [`ResolveError::InvalidDestinationKind`] unless the shape
    /// resolves to a struct, a sequence or a pointer.
    pub fn resolve_root(&self, shape: &'static Shape) -> Result<Arc<TypeDescriptor>, ResolveError> {
        let descriptor = self.resolve_shape(shape)?;
        if !descriptor.kind().is_addressable_composite() {
            return Err(ResolveError::InvalidDestinationKind {
                type_identifier: shape.type_identifier,
                kind: descriptor.kind(),
            });
        }
        Ok(descriptor)
    }

    /// Resolves any shape, memoizing it and everything it refers to.
    pub fn resolve_shape(
        &self,
        shape: &'static Shape,
    ) -> Result<Arc<TypeDescriptor>, ResolveError> {
        let id = shape.id();
        if let Some(descriptor) = self.get(id) {
            return Ok(descriptor);
        }
        let built = self.build(shape)?;
        Ok(self.publish(id, built))
    }

    /// Returns the descriptor published for `id`, if any.
    pub fn get(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Number of published descriptors.
    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, id: TypeId, built: TypeDescriptor) -> Arc<TypeDescriptor> {
        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        descriptors
            .entry(id)
            .or_insert_with(|| Arc::new(built))
            .clone()
    }

    fn build(&self, shape: &'static Shape) -> Result<TypeDescriptor, ResolveError> {
        // The temporal leaf is recognized by identity, never by structure.
        if shape.is_type::<Timestamp>() {
            return Ok(TypeDescriptor::leaf(shape, Kind::Temporal));
        }

        let descriptor = match shape.def {
            Def::Struct(def) => {
                let mut fields = Vec::with_capacity(def.fields.len());
                for field in def.fields {
                    let descriptor = self.resolve_shape(field.shape())?;
                    fields.push(FieldDescriptor::new(field, lookup_key(field), descriptor));
                }
                TypeDescriptor::with_fields(shape, fields)
            }
            Def::List(def) => {
                let element = self.resolve_shape(def.item())?;
                TypeDescriptor::with_element(shape, Kind::Sequence, element)
            }
            Def::Option(def) => {
                let pointee = self.resolve_shape(def.inner())?;
                TypeDescriptor::with_element(shape, Kind::Pointer, pointee)
            }
            Def::Scalar(ScalarDef::Numeric(_)) => TypeDescriptor::leaf(shape, Kind::NumericScalar),
            Def::Scalar(ScalarDef::String) => TypeDescriptor::leaf(shape, Kind::StringScalar),
            Def::Scalar(ScalarDef::Bool) => TypeDescriptor::leaf(shape, Kind::BooleanScalar),
            Def::Dynamic => TypeDescriptor::leaf(shape, Kind::Dynamic),
            Def::Opaque => {
                return Err(ResolveError::UnsupportedShape {
                    type_identifier: shape.type_identifier,
                });
            }
        };
        Ok(descriptor)
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("len", &self.len())
            .finish()
    }
}
