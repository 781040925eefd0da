//! Digital check-in and check-out
//!
//! A signed-in guest looks up their reservation by code and checks in or out
//! without the front desk. The backend says whether either step is open
//! through `can_check_in` / `can_check_out` on the reservation.

use std::path::Path;

use shared::error::ErrorCode;
use shared::models::{Invoice, Reservation};

use crate::api::HotelApi;
use crate::client::HttpClient;
use crate::error::{ClientResult, ValidationError};

/// Largest identity document accepted for check-in
pub const IDENTITY_DOCUMENT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const IDENTITY_DOCUMENT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];

const CHECK_IN_NOTE: &str = "Digital check-in";
const CHECK_OUT_NOTE: &str = "Digital check-out";

/// Scan or photo of the guest's identity document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDocument {
    pub file_name: String,
    pub size_bytes: u64,
}

impl IdentityDocument {
    /// Read name and size from a file on disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: metadata.len(),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let extension = Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !IDENTITY_DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::new(
                "document",
                "Identity document must be a JPG, PNG or PDF file",
            )
            .with_code(ErrorCode::InvalidFormat));
        }
        if self.size_bytes > IDENTITY_DOCUMENT_MAX_BYTES {
            return Err(ValidationError::new("document", "Identity document cannot exceed 5MB")
                .with_code(ErrorCode::ValueOutOfRange));
        }
        Ok(())
    }
}

/// Outcome of a digital check-out
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutSummary {
    pub reservation: Reservation,
    pub invoice: Option<Invoice>,
}

/// Codes are matched upper-cased, ignoring surrounding blanks
pub fn normalize_code(code: &str) -> Result<String, ValidationError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ValidationError::new("reservation_code", "Enter the reservation code")
            .with_code(ErrorCode::RequiredField));
    }
    Ok(code)
}

/// Look a reservation up by code; an exact code match wins over other hits
pub async fn find_by_code<H: HttpClient>(
    api: &HotelApi<H>,
    code: &str,
) -> ClientResult<Reservation> {
    let code = normalize_code(code)?;
    let mut found = api.search_reservations(&code).await?;
    if found.is_empty() {
        return Err(ValidationError::new(
            "reservation_code",
            format!("No reservation found for {}", code),
        )
        .with_code(ErrorCode::ReservationNotFound)
        .into());
    }
    let index = found
        .iter()
        .position(|r| r.reservation_code.eq_ignore_ascii_case(&code))
        .unwrap_or(0);
    Ok(found.swap_remove(index))
}

pub async fn check_in_by_code<H: HttpClient>(
    api: &HotelApi<H>,
    code: &str,
    document: &IdentityDocument,
) -> ClientResult<Reservation> {
    normalize_code(code)?;
    document.validate()?;

    let reservation = find_by_code(api, code).await?;
    if !reservation.can_check_in {
        return Err(not_open(&reservation, "checked in"));
    }
    api.check_in(reservation.id, CHECK_IN_NOTE).await?;
    tracing::info!(code = %reservation.reservation_code, "Digital check-in completed");
    Ok(reservation)
}

pub async fn check_out_by_code<H: HttpClient>(
    api: &HotelApi<H>,
    code: &str,
) -> ClientResult<CheckOutSummary> {
    let reservation = find_by_code(api, code).await?;
    if !reservation.can_check_out {
        return Err(not_open(&reservation, "checked out"));
    }
    let invoice = api.check_out(reservation.id, CHECK_OUT_NOTE).await?;
    tracing::info!(
        code = %reservation.reservation_code,
        invoiced = invoice.is_some(),
        "Digital check-out completed"
    );
    Ok(CheckOutSummary {
        reservation,
        invoice,
    })
}

fn not_open(reservation: &Reservation, step: &str) -> crate::ClientError {
    ValidationError::new(
        "reservation_code",
        format!(
            "Reservation {} cannot be {} right now",
            reservation.reservation_code, step
        ),
    )
    .with_code(ErrorCode::ReservationActionNotAllowed)
    .into()
}
