//! Incident Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of incident reported by staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Maintenance,
    Cleaning,
    Technical,
    Security,
    Other,
}

impl Default for IncidentType {
    fn default() -> Self {
        Self::Maintenance
    }
}

/// Incident priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for IncidentPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Incident progress as tracked by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Reported,
    InProgress,
    Resolved,
    Closed,
}

/// Incident entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub incident_type: IncidentType,
    pub priority: IncidentPriority,
    #[serde(default)]
    pub status: Option<IncidentStatus>,
    #[serde(default)]
    pub room_id: Option<i64>,
}

/// Create incident payload (`POST /incidents`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentCreate {
    pub title: String,
    pub description: String,
    pub incident_type: IncidentType,
    pub priority: IncidentPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub affects_guest_experience: bool,
    #[serde(default)]
    pub affects_safety: bool,
    #[serde(default)]
    pub affects_operations: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
}

/// `data` of `POST /incidents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentEnvelope {
    pub incident: Incident,
}
