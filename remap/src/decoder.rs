//! Decode a request once, then remap its body into the endpoint's type.

use core::fmt;
use std::sync::Arc;

use crate::{
    DecoderConfig, DescriptorCache, EnvelopeError, ErrorCode, HeaderError, MapError, Remap,
    RequestHeader, Timestamp, debug, decode_envelope_with, map_value,
};

/// Why [`Decoder::decode_and_map`] failed.
///
/// The variants carry full detail for logs. Callers should answer with
/// [`DecodeError::code`] and [`DecodeError::public_message`] only.
#[derive(Debug)]
pub enum DecodeError {
    /// The envelope could not be decoded.
    EnvelopeDecodeFailure(EnvelopeError),
    /// The request header failed validation.
    InvalidHeader(HeaderError),
    /// The body could not be mapped into the destination type.
    BodyMappingFailure(MapError),
}

impl DecodeError {
    /// The dictionary code to report.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::EnvelopeDecodeFailure(_) => ErrorCode::CannotDecodeInputRequest,
            DecodeError::InvalidHeader(_) => ErrorCode::ValidateFailed,
            DecodeError::BodyMappingFailure(_) => ErrorCode::MarshalFail,
        }
    }

    /// A message that is safe to send to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            DecodeError::InvalidHeader(_) => "request header is invalid",
            DecodeError::EnvelopeDecodeFailure(_) | DecodeError::BodyMappingFailure(_) => {
                "cannot interpret request body"
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EnvelopeDecodeFailure(err) => write!(f, "envelope decode failure: {err}"),
            DecodeError::InvalidHeader(err) => write!(f, "invalid header: {err}"),
            DecodeError::BodyMappingFailure(err) => write!(f, "body mapping failure: {err}"),
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DecodeError::EnvelopeDecodeFailure(err) => Some(err),
            DecodeError::InvalidHeader(err) => Some(err),
            DecodeError::BodyMappingFailure(err) => Some(err),
        }
    }
}

/// Decodes request envelopes and maps their bodies into typed values.
///
/// ```
/// use remap::{Decoder, DecoderConfig, Remap};
///
/// #[derive(Debug, Default, Remap)]
/// struct GetEmployee {
///     key: String,
/// }
///
/// let decoder = Decoder::new(DecoderConfig::default());
/// let raw = br#"{"header": {"request_id": "r-1"}, "body": {"key": "E1"}}"#;
/// let (header, request) = decoder.decode_and_map::<GetEmployee>(raw).unwrap();
/// assert_eq!(header.request_id, "r-1");
/// assert_eq!(request.key, "E1");
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecoderConfig,
    cache: Option<Arc<DescriptorCache>>,
}

impl Decoder {
    /// A decoder resolving descriptors through the process-wide cache.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    /// A decoder resolving descriptors through `cache`.
    pub fn with_cache(config: DecoderConfig, cache: Arc<DescriptorCache>) -> Self {
        Self {
            config,
            cache: Some(cache),
        }
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The descriptor cache in use.
    pub fn cache(&self) -> &DescriptorCache {
        match &self.cache {
            Some(cache) => cache,
            None => DescriptorCache::global(),
        }
    }

    /// Decodes `raw` and maps its body into a fresh `T`.
    ///
    /// Header validation, when enabled, runs against the current time.
    pub fn decode_and_map<T: Remap>(
        &self,
        raw: &[u8],
    ) -> Result<(RequestHeader, T), DecodeError> {
        self.decode_and_map_at(raw, Timestamp::now_utc())
    }

    /// Like [`Decoder::decode_and_map`], validating the header against `now`.
    pub fn decode_and_map_at<T: Remap>(
        &self,
        raw: &[u8],
        now: Timestamp,
    ) -> Result<(RequestHeader, T), DecodeError> {
        let cache = self.cache();

        let (header, body) = decode_envelope_with(raw, &self.config, cache).map_err(|err| {
            debug!("cannot decode envelope: {err}");
            DecodeError::EnvelopeDecodeFailure(err)
        })?;

        if self.config.validate_header {
            header.validate(now).map_err(|err| {
                debug!("rejected header of request {:?}: {err}", header.request_id);
                DecodeError::InvalidHeader(err)
            })?;
        }

        let mut dest = T::default();
        map_value(&mut dest, &body, cache).map_err(|err| {
            debug!(
                "cannot map body of request {:?} into `{}` at {}: {}",
                header.request_id,
                T::SHAPE,
                err.path(),
                err.root_cause()
            );
            DecodeError::BodyMappingFailure(err)
        })?;

        Ok((header, dest))
    }
}
