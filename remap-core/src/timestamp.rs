use core::any::TypeId;
use core::fmt;

use time::format_description::well_known::Rfc3339;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{Def, Remap, Shape};

const ZERO_DATE: Date = match Date::from_calendar_date(1, Month::January, 1) {
    Ok(date) => date,
    Err(_) => panic!("0001-01-01 is a valid calendar date"),
};

/// A point in time, the only temporal leaf the mapper knows about.
///
/// The mapper recognizes this type by identity and fills it from an RFC 3339
/// string. Its zero value is `0001-01-01T00:00:00Z`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// `0001-01-01T00:00:00Z`, the value an unset timestamp holds.
    pub const ZERO: Timestamp =
        Timestamp(PrimitiveDateTime::new(ZERO_DATE, Time::MIDNIGHT).assume_utc());

    /// Wraps an [`OffsetDateTime`].
    pub const fn new(inner: OffsetDateTime) -> Self {
        Self(inner)
    }

    /// The current time in UTC.
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parses an RFC 3339 timestamp such as `2024-03-01T09:30:00+07:00`.
    pub fn parse_rfc3339(input: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(input, &Rfc3339).map(Self)
    }

    /// Formats this timestamp as RFC 3339.
    pub fn to_rfc3339(&self) -> Result<String, time::error::Format> {
        self.0.format(&Rfc3339)
    }

    /// Returns true if this is [`Timestamp::ZERO`].
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns the wrapped [`OffsetDateTime`].
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(inner: OffsetDateTime) -> Self {
        Self(inner)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Remap for Timestamp {
    const SHAPE: &'static Shape = &Shape {
        id: TypeId::of::<Timestamp>,
        type_identifier: "Timestamp",
        def: Def::Opaque,
    };
}
