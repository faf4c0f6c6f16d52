//! The error-code dictionary handlers render failures with.

use core::fmt;

/// Description returned for codes the dictionary does not know.
pub const NOT_FOUND_MESSAGE: &str = "the internal code did not match to error message in dictionary";

macro_rules! error_codes {
    ($(
        $(#[$meta:meta])*
        $variant:ident = $code:literal => $description:literal,
    )*) => {
        /// A code from the error dictionary.
        ///
        /// Codes are grouped by their first digit: `0` general, `1` bad
        /// request, `2` internal server error, `4` business validation, `5`
        /// authorization.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl ErrorCode {
            /// Every code in the dictionary, in code order.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant),*];

            /// The code as it appears on the wire, e.g. `"1001"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $code,)*
                }
            }

            /// The human-readable description.
            pub const fn description(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $description,)*
                }
            }

            /// Looks up a wire code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(ErrorCode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

error_codes! {
    /// No error.
    NoneError = "0000" => "Success",
    /// An error the dictionary has no entry for.
    UnknownError = "0001" => "Cannot Recognize Error (out update error dictionary)",

    /// The request header failed validation.
    ValidateFailed = "1000" => "Validate failed",
    /// The request envelope could not be decoded.
    CannotDecodeInputRequest = "1001" => "Can't decode input request",
    /// The request body could not be mapped into the endpoint's type.
    MarshalFail = "1002" => "Marshal failed",
    /// Unmarshal failed.
    UnMarshalFail = "1003" => "Unmarshal failed",
    /// Duplicate request.
    DuplicateRequestInfo = "1004" => "Duplicate request information",

    /// Database server error.
    DatabaseServerError = "2000" => "Database server error",
    /// Removing from the key-value store failed.
    CannotRemoveRedis = "2001" => "Can't remove data from redis",
    /// Database update failed.
    CannotUpdateDataInDB = "2002" => "Can't update data in database",
    /// Database read failed.
    CannotGetDataFromDB = "2003" => "Can't get data from database",
    /// Upstream card service answered with a failure code.
    CardlinkResponseCodeFailed = "2004" => "Cardlink response code failed",
    /// Reading from the key-value store failed.
    CannotGetRedis = "2005" => "Can't get data redis",
    /// Writing to the key-value store failed.
    CannotSetRedis = "2006" => "Can't set data to redis",
    /// Scanning database rows failed.
    DatabaseScanErr = "2007" => "Database scanning error",

    /// Nothing matched the query.
    NotFoundItemInQuery = "4000" => "Not found item in query",
    /// A database request could not be decoded.
    CannotDecodeDatabaseRequest = "4001" => "Can't decode database request",
    /// Cursor error.
    CursorDatabaseErr = "4002" => "Cursor database error",
    /// Storing a transaction failed.
    StoreTransactionErr = "4003" => "Store transaction error",
    /// The transaction already exists.
    TransactionExisting = "4004" => "The information has existed",

    /// Authenticating against the key-value store failed.
    AuthenticationRedisFailed = "5000" => "Redis authentication failed",
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a wire code, or returns [`NOT_FOUND_MESSAGE`] for unknown codes.
pub fn describe(code: &str) -> &'static str {
    ErrorCode::from_code(code).map_or(NOT_FOUND_MESSAGE, ErrorCode::description)
}
