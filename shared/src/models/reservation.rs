//! Reservation Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    /// Set by the backend; no front-office action applies
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guest summary embedded in a reservation listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationGuest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Room summary embedded in a reservation listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRoom {
    #[serde(default)]
    pub id: Option<i64>,
    pub room_number: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub reservation_code: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub guest_id: Option<i64>,
    #[serde(default)]
    pub room_id: Option<i64>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub adults_count: u32,
    #[serde(default)]
    pub children_count: u32,
    #[serde(default)]
    pub nights_count: Option<u32>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub tax_amount: Option<Decimal>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Set by the backend when the guest may check in now
    #[serde(default)]
    pub can_check_in: bool,
    #[serde(default)]
    pub can_check_out: bool,
    #[serde(default)]
    pub guest: Option<ReservationGuest>,
    #[serde(default)]
    pub room: Option<ReservationRoom>,
}

/// Create reservation payload (`POST /reservations`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub room_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults_count: u32,
    pub children_count: u32,
    pub special_requests: String,
}

/// `POST /reservations/:id/checkin` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub notes: String,
}

/// `POST /reservations/:id/checkout` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutRequest {
    pub notes: String,
    pub generate_invoice: bool,
}

/// Invoice issued on check-out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub tax_amount: Option<Decimal>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

/// `data` of `POST /reservations/:id/checkout`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutResult {
    #[serde(default)]
    pub invoice: Option<Invoice>,
}

/// `POST /reservations/:id/cancel` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

/// `data` of `POST /reservations` and single-reservation responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationEnvelope {
    pub reservation: Reservation,
}

/// `data` of `GET /reservations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationList {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub pagination: Option<crate::response::Pagination>,
}
