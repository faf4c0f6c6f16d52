use core::fmt;

use crate::{Kind, ResolveError, ValueType};

/// A segment of the path to where a mapping failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A struct field, by lookup key.
    Field(&'static str),
    /// A sequence element.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error returned when an untyped value cannot be mapped into, or encoded
/// from, a destination type.
///
/// Failures deep inside a value are wrapped in
/// [`MapError::FieldConversionFailure`] and
/// [`MapError::ElementConversionFailure`] on the way out, so the error
/// carries the full path to where it happened.
#[derive(Debug)]
pub enum MapError {
    /// The destination root is not a struct, a sequence or a pointer.
    InvalidDestinationKind {
        /// The offending type.
        type_identifier: &'static str,
        /// What it resolved to.
        kind: Kind,
    },

    /// A type that cannot be remapped at all was reached.
    UnsupportedShape {
        /// The offending type.
        type_identifier: &'static str,
    },

    /// A struct, sequence or temporal destination received the wrong kind
    /// of value.
    TypeMismatch {
        /// What the destination is.
        expected: Kind,
        /// What the input was.
        got: ValueType,
    },

    /// A temporal destination received a string that is not RFC 3339.
    TemporalParseFailure {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        source: time::error::Parse,
    },

    /// A timestamp could not be rendered as RFC 3339.
    TemporalFormatFailure {
        /// Why it could not be rendered.
        source: time::error::Format,
    },

    /// A type's accessors disagree with the value they were handed.
    ///
    /// Only reachable through a hand-written `Remap` impl whose shape does
    /// not describe the type.
    AccessorMismatch {
        /// The type whose shape is inconsistent.
        type_identifier: &'static str,
    },

    /// A struct field failed to convert.
    FieldConversionFailure {
        /// The field's lookup key.
        field: &'static str,
        /// The failure inside the field.
        source: Box<MapError>,
    },

    /// A sequence element failed to convert.
    ElementConversionFailure {
        /// The element's position.
        index: usize,
        /// The failure inside the element.
        source: Box<MapError>,
    },
}

impl MapError {
    pub(crate) fn in_field(self, field: &'static str) -> Self {
        MapError::FieldConversionFailure {
            field,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, index: usize) -> Self {
        MapError::ElementConversionFailure {
            index,
            source: Box::new(self),
        }
    }

    /// The segments leading to where the failure happened, outermost first.
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                MapError::FieldConversionFailure { field, source } => {
                    segments.push(PathSegment::Field(*field));
                    current = &**source;
                }
                MapError::ElementConversionFailure { index, source } => {
                    segments.push(PathSegment::Index(*index));
                    current = &**source;
                }
                _ => return segments,
            }
        }
    }

    /// Renders the path to the failure, such as `.employees[1].joined_at`.
    ///
    /// Returns `<root>` when the failure is at the top level.
    pub fn path(&self) -> String {
        let segments = self.segments();
        if segments.is_empty() {
            return "<root>".into();
        }
        segments.iter().map(ToString::to_string).collect()
    }

    /// The innermost error, with all path context stripped.
    pub fn root_cause(&self) -> &MapError {
        let mut current = self;
        while let MapError::FieldConversionFailure { source, .. }
        | MapError::ElementConversionFailure { source, .. } = current
        {
            current = &**source;
        }
        current
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidDestinationKind {
                type_identifier,
                kind,
            } => write!(
                f,
                "invalid destination kind: `{type_identifier}` is a {kind}, expected a struct, sequence or pointer"
            ),
            MapError::UnsupportedShape { type_identifier } => {
                write!(f, "unsupported shape: `{type_identifier}` cannot be remapped")
            }
            MapError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {got}", expected_input(*expected))
            }
            MapError::TemporalParseFailure { input, .. } => {
                write!(f, "cannot parse {input:?} as an RFC 3339 timestamp")
            }
            MapError::TemporalFormatFailure { .. } => {
                f.write_str("cannot format timestamp as RFC 3339")
            }
            MapError::AccessorMismatch { type_identifier } => {
                write!(f, "the shape of `{type_identifier}` does not match its value")
            }
            MapError::FieldConversionFailure { .. } | MapError::ElementConversionFailure { .. } => {
                write!(f, "at {}: {}", self.path(), self.root_cause())
            }
        }
    }
}

/// The input a destination kind accepts, for messages.
fn expected_input(kind: Kind) -> &'static str {
    match kind {
        Kind::Struct => "mapping",
        Kind::Sequence => "sequence",
        Kind::Temporal => "RFC 3339 string",
        other => other.as_str(),
    }
}

impl core::error::Error for MapError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        // Wrappers already print their root cause, so the chain continues
        // below it rather than repeating it.
        match self.root_cause() {
            MapError::TemporalParseFailure { source, .. } => Some(source),
            MapError::TemporalFormatFailure { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ResolveError> for MapError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidDestinationKind {
                type_identifier,
                kind,
            } => MapError::InvalidDestinationKind {
                type_identifier,
                kind,
            },
            ResolveError::UnsupportedShape { type_identifier } => {
                MapError::UnsupportedShape { type_identifier }
            }
        }
    }
}
