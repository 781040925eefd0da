//! Shared types for the hotel front office
//!
//! Wire models, the JSON response envelope, auth DTOs and error codes used by
//! both the client library and the command-line portal.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use models::Role;
pub use response::ApiResponse;
