//! Type metadata and descriptor resolution for `remap`.
//!
//! A type opts into remapping by implementing [`Remap`], usually through
//! `#[derive(Remap)]`. Its [`Shape`] is static metadata; the
//! [`DescriptorCache`] resolves shapes into [`TypeDescriptor`]s the mapper
//! dispatches on, once per type.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

use core::any::Any;

mod shape;
pub use shape::*;

mod impls;

mod timestamp;
pub use timestamp::*;

mod descriptor;
pub use descriptor::*;

mod cache;
pub use cache::*;

/// A type that can be filled from, and encoded to, an untyped value tree.
///
/// Destinations start out as their [`Default`] value: fields that are absent
/// from the input keep it.
pub trait Remap: Default + Any {
    /// The shape of this type.
    const SHAPE: &'static Shape;
}

/// Returns `T`'s shape.
///
/// Exists so shapes can point at each other through plain `fn` pointers.
pub fn shape_of<T: Remap>() -> &'static Shape {
    T::SHAPE
}
