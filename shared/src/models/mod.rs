//! Data models
//!
//! Wire shapes of the hotel backend. All IDs are `i64`, money is
//! `rust_decimal::Decimal` and calendar dates are `chrono::NaiveDate`.

pub mod guest;
pub mod incident;
pub mod report;
pub mod reservation;
pub mod role;
pub mod room;

// Re-exports
pub use guest::*;
pub use incident::*;
pub use report::*;
pub use reservation::*;
pub use role::*;
pub use room::*;
