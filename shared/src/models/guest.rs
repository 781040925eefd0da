//! Guest Model

use serde::{Deserialize, Serialize};

/// Default identity document type for new guests
pub const DEFAULT_DOCUMENT_TYPE: &str = "passport";
/// Default document issuing country for new guests
pub const DEFAULT_DOCUMENT_COUNTRY: &str = "GT";

/// Guest profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub document_country: Option<String>,
}

/// Create guest payload (`POST /guests`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub document_type: String,
    pub document_number: String,
    pub document_country: String,
}

/// `data` of single-guest responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestEnvelope {
    pub guest: Guest,
}

/// `data` of `GET /guests`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestList {
    #[serde(default)]
    pub guests: Vec<Guest>,
}
