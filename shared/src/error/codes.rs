//! Unified error codes for the hotel front office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Room errors
//! - 4xxx: Reservation errors
//! - 5xxx: Guest errors
//! - 6xxx: Incident errors
//! - 7xxx: Report errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the portal can print
/// them and scripts can match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Rejected by a backend business rule
    BusinessRule = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,
    /// Password does not meet the strength rules
    PasswordTooWeak = 1008,
    /// Too many attempts
    TooManyAttempts = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role is required
    RoleRequired = 2002,

    // ==================== 3xxx: Room ====================
    /// Room not found
    RoomNotFound = 3001,
    /// Requested status change is not offered for this room
    RoomTransitionNotAllowed = 3002,
    /// No room available for the requested stay
    NoAvailability = 3003,
    /// Party does not fit in the room
    CapacityExceeded = 3004,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Requested action is not offered for this reservation
    ReservationActionNotAllowed = 4002,
    /// Check-out is not after check-in, or check-in is in the past
    InvalidDateRange = 4003,
    /// Children booked without an adult
    ChildrenWithoutAdult = 4004,
    /// Confirmation window ran out
    ConfirmationExpired = 4005,
    /// Guest contact details are incomplete
    GuestDetailsIncomplete = 4006,
    /// Cancellation needs a reason
    CancellationReasonRequired = 4007,
    /// Wizard is not in a state that accepts this input
    InvalidWizardState = 4008,

    // ==================== 5xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 5001,

    // ==================== 6xxx: Incident ====================
    /// Incident report is invalid
    IncidentInvalid = 6001,

    // ==================== 7xxx: Report ====================
    /// Report range is invalid
    ReportRangeInvalid = 7001,
    /// Report export failed
    ReportExportFailed = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Response could not be understood
    InvalidResponse = 9006,

    // ==================== 94xx: Storage ====================
    /// Local storage failed
    StorageError = 9401,
    /// Stored data is damaged
    StorageCorrupted = 9403,
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
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::BusinessRule => "Request rejected by the hotel",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::PasswordTooWeak => "Password is too weak",
            ErrorCode::TooManyAttempts => "Too many attempts",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",

            // Room
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomTransitionNotAllowed => "Room status change not allowed",
            ErrorCode::NoAvailability => "No rooms available for the selected dates",
            ErrorCode::CapacityExceeded => "Party exceeds room capacity",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationActionNotAllowed => "Reservation action not allowed",
            ErrorCode::InvalidDateRange => "Invalid date range",
            ErrorCode::ChildrenWithoutAdult => "Children require at least one adult",
            ErrorCode::ConfirmationExpired => "Confirmation time expired",
            ErrorCode::GuestDetailsIncomplete => "Guest details are incomplete",
            ErrorCode::CancellationReasonRequired => "Cancellation reason is required",
            ErrorCode::InvalidWizardState => "Action not available at this step",

            // Guest
            ErrorCode::GuestNotFound => "Guest not found",

            // Incident
            ErrorCode::IncidentInvalid => "Incident report is invalid",

            // Report
            ErrorCode::ReportRangeInvalid => "Report date range is invalid",
            ErrorCode::ReportExportFailed => "Report export failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidResponse => "Invalid response from server",

            // Storage
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::StorageCorrupted => "Local storage corrupted",
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
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::BusinessRule),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),
            1008 => Ok(ErrorCode::PasswordTooWeak),
            1009 => Ok(ErrorCode::TooManyAttempts),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Room
            3001 => Ok(ErrorCode::RoomNotFound),
            3002 => Ok(ErrorCode::RoomTransitionNotAllowed),
            3003 => Ok(ErrorCode::NoAvailability),
            3004 => Ok(ErrorCode::CapacityExceeded),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationActionNotAllowed),
            4003 => Ok(ErrorCode::InvalidDateRange),
            4004 => Ok(ErrorCode::ChildrenWithoutAdult),
            4005 => Ok(ErrorCode::ConfirmationExpired),
            4006 => Ok(ErrorCode::GuestDetailsIncomplete),
            4007 => Ok(ErrorCode::CancellationReasonRequired),
            4008 => Ok(ErrorCode::InvalidWizardState),

            // Guest
            5001 => Ok(ErrorCode::GuestNotFound),

            // Incident
            6001 => Ok(ErrorCode::IncidentInvalid),

            // Report
            7001 => Ok(ErrorCode::ReportRangeInvalid),
            7002 => Ok(ErrorCode::ReportExportFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::InvalidResponse),

            // Storage
            9401 => Ok(ErrorCode::StorageError),
            9403 => Ok(ErrorCode::StorageCorrupted),

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

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::ValidationFailed,
        ErrorCode::BusinessRule,
        ErrorCode::NotAuthenticated,
        ErrorCode::PasswordTooWeak,
        ErrorCode::PermissionDenied,
        ErrorCode::RoomTransitionNotAllowed,
        ErrorCode::CapacityExceeded,
        ErrorCode::ConfirmationExpired,
        ErrorCode::InvalidWizardState,
        ErrorCode::GuestNotFound,
        ErrorCode::IncidentInvalid,
        ErrorCode::ReportExportFailed,
        ErrorCode::InvalidResponse,
        ErrorCode::StorageCorrupted,
    ];

    #[test]
    fn test_try_from_matches_discriminant() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::CapacityExceeded).unwrap();
        assert_eq!(json, "3004");

        let code: ErrorCode = serde_json::from_str("4005").unwrap();
        assert_eq!(code, ErrorCode::ConfirmationExpired);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NetworkError), "9003");
    }
}
