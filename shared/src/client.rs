//! Client-related types shared between the library and the portal
//!
//! Auth request/response DTOs used in API communication.

use serde::{Deserialize, Serialize};

use crate::models::Role;

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
///
/// `credential` is either the username or the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub credential: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(credential: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            password: password.into(),
        }
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserInfo {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone().unwrap_or_else(|| self.email.clone())
        } else {
            name.to_string()
        }
    }
}

/// Partial user update, merged field by field into the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserInfo {
    /// Apply the set fields of `update`; id and role never change
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.username {
            self.username = Some(v);
        }
        if let Some(v) = update.phone {
            self.phone = Some(v);
        }
    }
}

/// Self-registration request (`POST /auth/register`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Password change request (`POST /auth/change-password`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `data` of `GET /auth/profile` and `PUT /auth/profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
}
