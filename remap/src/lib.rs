//! Decode a request once, then remap its untyped body into whatever type the
//! endpoint expects, without a second pass over the text.
//!
//! - [`UntypedValue`] is the generically decoded tree.
//! - `#[derive(Remap)]` describes a destination type.
//! - [`from_value`] / [`map_value`] fill a destination from a tree, and
//!   [`to_value`] goes the other way.
//! - [`Decoder`] ties it together for `{header, body}` request envelopes.
//!
//! Type descriptors are resolved once per type and kept in a
//! [`DescriptorCache`]: the process-wide one by default, or one you inject.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

extern crate self as remap;

pub use remap_core::*;
pub use remap_value::*;
pub use remap_value::value;

pub use remap_core::Remap;
pub use remap_macros::Remap;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace};

mod error;
pub use error::*;

mod map;
pub use map::*;

mod encode;
pub use encode::*;

mod config;
pub use config::*;

pub mod error_code;
pub use error_code::ErrorCode;

mod header;
pub use header::*;

mod response;
pub use response::*;

mod envelope;
pub use envelope::*;

mod decoder;
pub use decoder::*;
