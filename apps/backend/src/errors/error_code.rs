//! Error codes for the card-year API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP Problem Details responses. Add new codes here;
//! never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes for the card-year API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Body or query could not be read or parsed
    BadRequest,

    // Card Source
    /// Card lookup by name found nothing
    CardNotFound,
    /// Card source failed or ran out of attempts
    CardSourceUnavailable,

    // Resource Not Found
    NotFound,

    // System Errors
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",

            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::CardSourceUnavailable => "CARD_SOURCE_UNAVAILABLE",

            Self::NotFound => "NOT_FOUND",

            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
