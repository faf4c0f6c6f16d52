//! The response header handlers send back.

use crate::{ErrorCode, Remap, RequestHeader, Timestamp};

/// Status code of a successful response.
pub const STATUS_SUCCESS: &str = "00";
/// Status code of a failed response.
pub const STATUS_FAILED: &str = "01";

/// The error part of a [`ResponseHeader`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Remap)]
pub struct ResponseError {
    /// A code from the error dictionary, e.g. `"1001"`.
    pub error_code: String,
    /// The code's description.
    pub error_desc: String,
}

impl From<ErrorCode> for ResponseError {
    fn from(code: ErrorCode) -> Self {
        Self {
            error_code: code.as_str().into(),
            error_desc: code.description().into(),
        }
    }
}

/// Header of every response, successful or not.
///
/// Encode it with [`crate::to_value`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Remap)]
pub struct ResponseHeader {
    /// The responding application.
    pub response_app_id: String,
    /// The request id this responds to; empty on failures.
    pub response_id: String,
    /// When the response was produced.
    pub response_datetime: Timestamp,
    /// [`STATUS_SUCCESS`] or [`STATUS_FAILED`].
    pub status_code: String,
    /// What went wrong, or [`ErrorCode::NoneError`].
    pub error: ResponseError,
}

impl ResponseHeader {
    /// A successful response to `request`.
    pub fn success(app_id: impl Into<String>, request: &RequestHeader, now: Timestamp) -> Self {
        Self {
            response_app_id: app_id.into(),
            response_id: request.request_id.clone(),
            response_datetime: now,
            status_code: STATUS_SUCCESS.into(),
            error: ErrorCode::NoneError.into(),
        }
    }

    /// A failed response carrying `code`.
    pub fn failure(app_id: impl Into<String>, code: ErrorCode, now: Timestamp) -> Self {
        Self {
            response_app_id: app_id.into(),
            response_id: String::new(),
            response_datetime: now,
            status_code: STATUS_FAILED.into(),
            error: code.into(),
        }
    }

    /// Returns true if this is a success response.
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_SUCCESS
    }
}
