//! The request header carried in every envelope, and its validation.

use core::fmt;

use crate::{Remap, Timestamp};

/// Request ids must be at least this long.
pub const REQUEST_ID_MIN_LEN: usize = 2;
/// Request ids must be at most this long.
pub const REQUEST_ID_MAX_LEN: usize = 50;
/// App ids must be at most this long.
pub const APP_ID_MAX_LEN: usize = 5;
/// Request datetimes must be at most this long.
pub const DATETIME_MAX_LEN: usize = 43;

/// Identifies the calling application and the request.
///
/// Fields are kept as strings so a malformed header still decodes;
/// [`RequestHeader::validate`] checks them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Remap)]
pub struct RequestHeader {
    /// The calling application.
    #[remap(rename = "request_app_id")]
    pub app_id: String,
    /// When the request was made, RFC 3339.
    pub request_datetime: String,
    /// Caller-chosen request id.
    pub request_id: String,
}

/// A header field, named by its wire key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    /// `request_app_id`
    AppId,
    /// `request_datetime`
    RequestDatetime,
    /// `request_id`
    RequestId,
}

impl HeaderField {
    /// The field's wire key.
    pub const fn as_str(self) -> &'static str {
        match self {
            HeaderField::AppId => "request_app_id",
            HeaderField::RequestDatetime => "request_datetime",
            HeaderField::RequestId => "request_id",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request header was rejected.
#[derive(Debug)]
pub enum HeaderError {
    /// The field is empty.
    Missing(HeaderField),
    /// The field is too short or too long.
    OutOfLength(HeaderField),
    /// The request datetime is not RFC 3339.
    MalformedDatetime {
        /// Why it was rejected.
        source: time::error::Parse,
    },
    /// The request datetime is not on the current day.
    StaleDatetime,
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::Missing(field) => write!(f, "{field} is missing"),
            HeaderError::OutOfLength(field) => write!(f, "{field} is out of length"),
            HeaderError::MalformedDatetime { .. } => f.write_str("invalid request_datetime"),
            HeaderError::StaleDatetime => f.write_str("invalid request_date"),
        }
    }
}

impl core::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            HeaderError::MalformedDatetime { source } => Some(source),
            _ => None,
        }
    }
}

impl RequestHeader {
    /// Parses the request datetime.
    pub fn request_date(&self) -> Result<Timestamp, time::error::Parse> {
        Timestamp::parse_rfc3339(&self.request_datetime)
    }

    /// Checks the header against the envelope rules, with `now` as the
    /// current time.
    ///
    /// The request datetime must fall on the same calendar day as `now`,
    /// compared in the request's own offset. Its length limit applies to the
    /// string as sent, before parsing, so a valid timestamp with a long
    /// fractional second can still be out of length.
    pub fn validate(&self, now: Timestamp) -> Result<(), HeaderError> {
        check_len(
            &self.request_id,
            HeaderField::RequestId,
            REQUEST_ID_MIN_LEN..=REQUEST_ID_MAX_LEN,
        )?;
        check_len(&self.app_id, HeaderField::AppId, 1..=APP_ID_MAX_LEN)?;
        check_len(
            &self.request_datetime,
            HeaderField::RequestDatetime,
            1..=DATETIME_MAX_LEN,
        )?;

        let date = self
            .request_date()
            .map_err(|source| HeaderError::MalformedDatetime { source })?;
        if date.is_zero() {
            return Err(HeaderError::Missing(HeaderField::RequestDatetime));
        }

        let date = date.as_offset_date_time();
        let today = now.as_offset_date_time().to_offset(date.offset()).date();
        if date.date() != today {
            return Err(HeaderError::StaleDatetime);
        }
        Ok(())
    }
}

fn check_len(
    value: &str,
    field: HeaderField,
    allowed: core::ops::RangeInclusive<usize>,
) -> Result<(), HeaderError> {
    if value.is_empty() {
        return Err(HeaderError::Missing(field));
    }
    if !allowed.contains(&value.len()) {
        return Err(HeaderError::OutOfLength(field));
    }
    Ok(())
}
