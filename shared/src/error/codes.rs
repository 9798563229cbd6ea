//! Error codes of the front desk API
//!
//! - 0xxx: request errors
//! - 70xx: venue, floor and table
//! - 71xx: visits
//! - 72xx: waiting list
//! - 9xxx: storage and configuration
//!
//! "Venue full" is not an error code: it travels as a seat outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every failed `ApiResponse`
///
/// Serialized as its u16 value so the front desk UI can switch on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    /// Payload rejected (blank client name, oversized field ...)
    ValidationFailed = 2,

    VenueNotFound = 7001,
    /// Table held by another active visit at commit time
    TableOccupied = 7002,
    /// Floor missing, unexpected or out of range for the venue
    FloorConfigInvalid = 7004,
    TableOutOfRange = 7005,

    VisitNotFound = 7101,
    VisitAlreadyFinished = 7102,

    WaitlistEntryNotFound = 7201,
    WaitlistEntryAlreadySeated = 7202,

    DatabaseError = 9002,
    /// Floor plan unreadable or invalid
    ConfigError = 9004,
}

impl ErrorCode {
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message, shown when no specific one is given
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::VenueNotFound => "Venue not found",
            ErrorCode::TableOccupied => "Table is occupied",
            ErrorCode::FloorConfigInvalid => "Invalid floor for venue",
            ErrorCode::TableOutOfRange => "Table number out of range",
            ErrorCode::VisitNotFound => "Visit not found",
            ErrorCode::VisitAlreadyFinished => "Visit already finished",
            ErrorCode::WaitlistEntryNotFound => "Waiting list entry not found",
            ErrorCode::WaitlistEntryAlreadySeated => "Waiting list entry already seated",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Unknown u16 given where an [`ErrorCode`] was expected
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
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            7001 => Ok(ErrorCode::VenueNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7004 => Ok(ErrorCode::FloorConfigInvalid),
            7005 => Ok(ErrorCode::TableOutOfRange),
            7101 => Ok(ErrorCode::VisitNotFound),
            7102 => Ok(ErrorCode::VisitAlreadyFinished),
            7201 => Ok(ErrorCode::WaitlistEntryNotFound),
            7202 => Ok(ErrorCode::WaitlistEntryAlreadySeated),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::ConfigError),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_by_range() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::TableOccupied.code(), 7002);
        assert_eq!(ErrorCode::VisitAlreadyFinished.code(), 7102);
        assert_eq!(ErrorCode::WaitlistEntryAlreadySeated.code(), 7202);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_wire_format_is_numeric() {
        let json = serde_json::to_string(&ErrorCode::TableOccupied).unwrap();
        assert_eq!(json, "7002");
        let code: ErrorCode = serde_json::from_str("7201").unwrap();
        assert_eq!(code, ErrorCode::WaitlistEntryNotFound);
        // 7003 is not a code: a full venue is a seat outcome
        assert!(serde_json::from_str::<ErrorCode>("7003").is_err());
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }
}
