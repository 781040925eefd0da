//! Report Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Occupancy,
    Sales,
}

impl ReportKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Occupancy => "occupancy",
            ReportKind::Sales => "sales",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query of a ranged report
///
/// Optional filters are only sent when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl ReportQuery {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            category: None,
            status: None,
            payment_method: None,
        }
    }
}

/// Report payload as served; the client does not interpret its layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportSnapshot(pub serde_json::Value);
