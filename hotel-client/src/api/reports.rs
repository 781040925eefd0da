//! Report endpoints

use shared::models::{ReportKind, ReportQuery, ReportSnapshot};
use shared::response::ApiResponse;

use super::{HotelApi, into_data, with_query};
use crate::{ClientResult, HttpClient};

fn report_params(query: &ReportQuery) -> Vec<(&'static str, String)> {
    vec![
        ("start_date", query.start_date.to_string()),
        ("end_date", query.end_date.to_string()),
        ("category", query.category.clone().unwrap_or_default()),
        ("status", query.status.clone().unwrap_or_default()),
        ("payment_method", query.payment_method.clone().unwrap_or_default()),
    ]
}

impl<H: HttpClient> HotelApi<H> {
    /// `GET /reports/occupancy` or `GET /reports/sales`
    pub async fn report(&self, kind: ReportKind, query: &ReportQuery) -> ClientResult<ReportSnapshot> {
        let path = with_query(&format!("reports/{}", kind), &report_params(query));
        let resp: ApiResponse<ReportSnapshot> = self.http.get(&path).await?;
        into_data(resp, kind.as_str())
    }

    /// `GET /reports/dashboard?period=N` (days)
    pub async fn dashboard(&self, period_days: u32) -> ClientResult<ReportSnapshot> {
        let path = with_query("reports/dashboard", &[("period", period_days.to_string())]);
        let resp: ApiResponse<ReportSnapshot> = self.http.get(&path).await?;
        into_data(resp, "dashboard")
    }
}
