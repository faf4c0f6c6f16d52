//! `remap-value` provides [`UntypedValue`], the tree a self-describing payload
//! decodes into before anyone knows what type it is meant to become.
//!
//! # Shape
//!
//! - **Mapping**: string keys to values, keys unique
//! - **Sequence**: an ordered list of values
//! - **Scalar**: a [`Number`] (integers stay exact), a string or a boolean
//! - **Null**
//!
//! Values (de)serialize through serde, so any self-describing serde format
//! can produce them; the [`value!`] macro builds them by hand.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

mod macros;

mod number;
pub use number::*;

mod value;
pub use value::*;

mod serde_impl;

mod remap_impl;
