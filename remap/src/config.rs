use serde::Deserialize;

/// How request envelopes are laid out and checked.
///
/// Deserializes from any serde format, so hosts can keep it in their own
/// configuration files; missing keys take their defaults.
///
/// ```
/// use remap::DecoderConfig;
///
/// let config = DecoderConfig::default()
///     .with_header_key("meta")
///     .with_max_payload_len(64 * 1024);
/// assert_eq!(config.body_key, "body");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Envelope key holding the request header.
    pub header_key: String,
    /// Envelope key holding the request body.
    pub body_key: String,
    /// Payloads longer than this many bytes are rejected before decoding.
    pub max_payload_len: Option<usize>,
    /// Whether to validate the request header before mapping the body.
    pub validate_header: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_key: "header".into(),
            body_key: "body".into(),
            max_payload_len: None,
            validate_header: false,
        }
    }
}

impl DecoderConfig {
    /// The `kbank_header` / `request_body` layout, with header validation on.
    pub fn kbank() -> Self {
        Self {
            header_key: "kbank_header".into(),
            body_key: "request_body".into(),
            max_payload_len: None,
            validate_header: true,
        }
    }

    /// Sets the header key.
    pub fn with_header_key(mut self, key: impl Into<String>) -> Self {
        self.header_key = key.into();
        self
    }

    /// Sets the body key.
    pub fn with_body_key(mut self, key: impl Into<String>) -> Self {
        self.body_key = key.into();
        self
    }

    /// Sets the payload length limit, in bytes.
    pub fn with_max_payload_len(mut self, limit: usize) -> Self {
        self.max_payload_len = Some(limit);
        self
    }

    /// Turns header validation on or off.
    pub fn with_validate_header(mut self, validate: bool) -> Self {
        self.validate_header = validate;
        self
    }
}
