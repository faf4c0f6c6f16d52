//! Splits a raw request envelope into its header and untyped body.

use core::fmt;

use crate::{
    DecoderConfig, DescriptorCache, MapError, RequestHeader, UntypedValue, ValueType, map_value,
};

/// Why an envelope could not be decoded.
#[derive(Debug)]
pub enum EnvelopeError {
    /// The payload is longer than [`DecoderConfig::max_payload_len`].
    TooLarge {
        /// Payload length in bytes.
        len: usize,
        /// The configured limit.
        limit: usize,
    },
    /// The payload is not valid JSON.
    Malformed(serde_json::Error),
    /// The payload's root is not a mapping.
    NotAMapping(ValueType),
    /// The header does not fit [`RequestHeader`].
    Header(MapError),
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::TooLarge { len, limit } => {
                write!(f, "payload is {len} bytes, the limit is {limit}")
            }
            EnvelopeError::Malformed(_) => f.write_str("payload is not valid JSON"),
            EnvelopeError::NotAMapping(got) => {
                write!(f, "envelope must be a mapping, got {got}")
            }
            EnvelopeError::Header(_) => f.write_str("cannot map request header"),
        }
    }
}

impl core::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EnvelopeError::Malformed(err) => Some(err),
            EnvelopeError::Header(err) => Some(err),
            _ => None,
        }
    }
}

/// Decodes `raw` and splits it into header and body, using the process-wide
/// descriptor cache for the header.
pub fn decode_envelope(
    raw: &[u8],
    config: &DecoderConfig,
) -> Result<(RequestHeader, UntypedValue), EnvelopeError> {
    decode_envelope_with(raw, config, DescriptorCache::global())
}

/// Decodes `raw` and splits it into header and body.
///
/// A missing or `null` header yields the default header; a missing body
/// yields [`UntypedValue::Null`]. Keys other than the header and body keys
/// are ignored.
///
/// Unlike the body, the header is typed strictly: a header field holding
/// anything but a string or `null` fails with [`EnvelopeError::Header`]
/// instead of being left empty.
pub fn decode_envelope_with(
    raw: &[u8],
    config: &DecoderConfig,
    cache: &DescriptorCache,
) -> Result<(RequestHeader, UntypedValue), EnvelopeError> {
    if let Some(limit) = config.max_payload_len
        && raw.len() > limit
    {
        return Err(EnvelopeError::TooLarge {
            len: raw.len(),
            limit,
        });
    }

    let root: UntypedValue = serde_json::from_slice(raw).map_err(EnvelopeError::Malformed)?;
    let mut envelope = match root {
        UntypedValue::Mapping(envelope) => envelope,
        other => return Err(EnvelopeError::NotAMapping(other.value_type())),
    };

    let mut header = RequestHeader::default();
    if let Some(raw_header) = envelope.get(&config.header_key)
        && !raw_header.is_null()
    {
        check_header_fields(raw_header, cache).map_err(EnvelopeError::Header)?;
        map_value(&mut header, raw_header, cache).map_err(EnvelopeError::Header)?;
    }

    let body = envelope
        .swap_remove(&config.body_key)
        .unwrap_or(UntypedValue::Null);
    Ok((header, body))
}

// Every header field is a string; the lenient mapper would discard the rest.
fn check_header_fields(
    raw_header: &UntypedValue,
    cache: &DescriptorCache,
) -> Result<(), MapError> {
    let UntypedValue::Mapping(fields) = raw_header else {
        return Ok(());
    };
    let descriptor = cache.resolve::<RequestHeader>()?;
    for field in descriptor.fields() {
        match fields.get(field.lookup_key()) {
            Some(value) if !value.is_null() && value.as_str().is_none() => {
                return Err(MapError::TypeMismatch {
                    expected: field.kind(),
                    got: value.value_type(),
                }
                .in_field(field.lookup_key()));
            }
            _ => {}
        }
    }
    Ok(())
}
