//! Unified error codes for the booking workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 7xxx: Table errors (70xx tables, 74xx bookings)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the presentation layer
/// can localize messages by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 70xx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table id appears twice in the catalog
    TableIdDuplicated = 7003,
    /// Table capacity must be positive
    TableInvalidCapacity = 7004,

    // ==================== 74xx: Booking ====================
    /// Booking not found
    BookingNotFound = 7401,
    /// No table selected for the booking
    BookingNoTable = 7402,
    /// Booking date is in the past
    BookingPastDate = 7403,
    /// Restaurant is closed on the booking date
    BookingClosedDay = 7404,
    /// Booking time has already passed today
    BookingPastTime = 7405,
    /// Selected tables seat fewer guests than the party size
    BookingUnderCapacity = 7406,
    /// Selected tables already booked in this time slot
    BookingConflict = 7407,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableIdDuplicated => "Table id is duplicated",
            ErrorCode::TableInvalidCapacity => "Table capacity must be positive",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingNoTable => "At least one table must be selected",
            ErrorCode::BookingPastDate => "Cannot book a date in the past",
            ErrorCode::BookingClosedDay => "Restaurant is closed on this day",
            ErrorCode::BookingPastTime => "Cannot book a time that has already passed",
            ErrorCode::BookingUnderCapacity => "Selected tables cannot seat the whole party",
            ErrorCode::BookingConflict => "Selected table is already booked in this time slot",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7003 => Ok(ErrorCode::TableIdDuplicated),
            7004 => Ok(ErrorCode::TableInvalidCapacity),

            // Booking
            7401 => Ok(ErrorCode::BookingNotFound),
            7402 => Ok(ErrorCode::BookingNoTable),
            7403 => Ok(ErrorCode::BookingPastDate),
            7404 => Ok(ErrorCode::BookingClosedDay),
            7405 => Ok(ErrorCode::BookingPastTime),
            7406 => Ok(ErrorCode::BookingUnderCapacity),
            7407 => Ok(ErrorCode::BookingConflict),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RequiredField.code(), 7);

        assert_eq!(ErrorCode::TableNotFound.code(), 7001);
        assert_eq!(ErrorCode::TableIdDuplicated.code(), 7003);

        assert_eq!(ErrorCode::BookingNotFound.code(), 7401);
        assert_eq!(ErrorCode::BookingClosedDay.code(), 7404);
        assert_eq!(ErrorCode::BookingConflict.code(), 7407);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_every_code_parses_back() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::TableNotFound,
            ErrorCode::TableIdDuplicated,
            ErrorCode::TableInvalidCapacity,
            ErrorCode::BookingNotFound,
            ErrorCode::BookingNoTable,
            ErrorCode::BookingPastDate,
            ErrorCode::BookingClosedDay,
            ErrorCode::BookingPastTime,
            ErrorCode::BookingUnderCapacity,
            ErrorCode::BookingConflict,
            ErrorCode::InternalError,
            ErrorCode::ConfigError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(7002), Err(InvalidErrorCode(7002)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::BookingConflict).unwrap();
        assert_eq!(json, "7407");

        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::BookingPastTime), "7405");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::BookingNotFound.message(), "Booking not found");
        assert_eq!(
            ErrorCode::BookingClosedDay.message(),
            "Restaurant is closed on this day"
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
