//! Unified error codes for the hotel front office
//!
//! - [`ErrorCode`]: Standardized numeric codes for every failure the client reports
//! - [`ErrorCategory`]: Classification of errors by domain
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Room errors
//! - 4xxx: Reservation errors
//! - 5xxx: Guest errors
//! - 6xxx: Incident errors
//! - 7xxx: Report errors
//! - 9xxx: System errors

mod category;
mod codes;
mod http;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
