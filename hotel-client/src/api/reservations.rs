//! Reservation endpoints

use chrono::NaiveDate;
use shared::models::{
    CancelRequest, CheckInRequest, CheckOutRequest, CheckOutResult, Invoice, Reservation,
    ReservationCreate, ReservationEnvelope, ReservationList, ReservationStatus,
};
use shared::response::ApiResponse;

use super::{HotelApi, into_data, into_optional, into_unit, with_query};
use crate::{ClientResult, HttpClient};

/// Reservations fetched per board load
pub const RESERVATION_PAGE_LIMIT: u32 = 50;

/// Reservation board filters; empty filters are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Free text matched by the backend against code and guest
    pub search: String,
}

impl ReservationFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.map(|s| s.to_string()).unwrap_or_default()),
            ("start_date", self.start_date.map(|d| d.to_string()).unwrap_or_default()),
            ("end_date", self.end_date.map(|d| d.to_string()).unwrap_or_default()),
            ("search", self.search.clone()),
            ("page", "1".to_string()),
            ("limit", RESERVATION_PAGE_LIMIT.to_string()),
        ]
    }
}

impl<H: HttpClient> HotelApi<H> {
    /// `GET /reservations`
    pub async fn list_reservations(&self, filter: &ReservationFilter) -> ClientResult<Vec<Reservation>> {
        let path = with_query("reservations", &filter.to_query());
        let resp: ApiResponse<ReservationList> = self.http.get(&path).await?;
        Ok(into_data(resp, "reservations")?.reservations)
    }

    /// `GET /reservations/search?query=`, matched by code or guest
    pub async fn search_reservations(&self, query: &str) -> ClientResult<Vec<Reservation>> {
        let path = with_query("reservations/search", &[("query", query.to_string())]);
        let resp: ApiResponse<ReservationList> = self.http.get(&path).await?;
        Ok(into_data(resp, "reservations")?.reservations)
    }

    /// `POST /reservations`
    pub async fn create_reservation(&self, request: &ReservationCreate) -> ClientResult<Reservation> {
        let resp: ApiResponse<ReservationEnvelope> = self.http.post("reservations", request).await?;
        Ok(into_data(resp, "reservation")?.reservation)
    }

    /// `POST /reservations/:id/confirm`
    pub async fn confirm_reservation(&self, id: i64) -> ClientResult<()> {
        into_unit(self.http.post_empty(&format!("reservations/{}/confirm", id)).await?)
    }

    /// `POST /reservations/:id/checkin`
    pub async fn check_in(&self, id: i64, notes: &str) -> ClientResult<()> {
        let body = CheckInRequest {
            notes: notes.to_string(),
        };
        into_unit(self.http.post(&format!("reservations/{}/checkin", id), &body).await?)
    }

    /// `POST /reservations/:id/checkout`, always asking for an invoice
    pub async fn check_out(&self, id: i64, notes: &str) -> ClientResult<Option<Invoice>> {
        let body = CheckOutRequest {
            notes: notes.to_string(),
            generate_invoice: true,
        };
        let resp: ApiResponse<CheckOutResult> =
            self.http.post(&format!("reservations/{}/checkout", id), &body).await?;
        Ok(into_optional(resp)?.and_then(|r| r.invoice))
    }

    /// `POST /reservations/:id/cancel`
    pub async fn cancel_reservation(&self, id: i64, reason: &str) -> ClientResult<()> {
        let body = CancelRequest {
            reason: reason.to_string(),
        };
        into_unit(self.http.post(&format!("reservations/{}/cancel", id), &body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_filter_query() {
        let filter = ReservationFilter {
            status: Some(ReservationStatus::CheckedIn),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: None,
            search: "MAR-".into(),
        };
        assert_eq!(
            with_query("reservations", &filter.to_query()),
            "reservations?status=checked_in&start_date=2024-03-01&search=MAR-&page=1&limit=50"
        );
    }
}
