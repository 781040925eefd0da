//! Service layer over the hotel REST API
//!
//! [`HotelApi`] owns the transport and unwraps the `{success, message, data}`
//! envelope for every endpoint. One method is one backend call.

mod auth;
mod guests;
mod incidents;
mod reports;
mod reservations;
mod rooms;

pub use reservations::ReservationFilter;
pub use rooms::RoomFilter;

use shared::response::ApiResponse;

use crate::{ClientError, ClientResult, HttpClient};

/// Typed access to the backend endpoints
#[derive(Debug, Clone)]
pub struct HotelApi<H> {
    http: H,
}

impl<H: HttpClient> HotelApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    pub(crate) fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }
}

/// Extract `data`, treating `success: false` as a rejection
pub(crate) fn into_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    ensure_success(resp.success, resp.message)?;
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
}

/// Extract `data` when the endpoint may leave it out
pub(crate) fn into_optional<T>(resp: ApiResponse<T>) -> ClientResult<Option<T>> {
    ensure_success(resp.success, resp.message)?;
    Ok(resp.data)
}

/// Check an envelope whose payload the caller does not need
pub(crate) fn into_unit(resp: ApiResponse<serde_json::Value>) -> ClientResult<()> {
    ensure_success(resp.success, resp.message)
}

fn ensure_success(success: bool, message: Option<String>) -> ClientResult<()> {
    if success {
        return Ok(());
    }
    Err(ClientError::Rejected {
        status: 200,
        message: message.unwrap_or_default(),
    })
}

/// `path?k=v&...`, leaving out blank values
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> String {
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(k, v)| shared::util::non_blank(v).map(|v| (*k, v)))
        .collect();
    if pairs.is_empty() {
        return path.to_string();
    }
    let mut url = match reqwest::Url::parse("http://query.invalid/") {
        Ok(url) => url,
        Err(_) => return path.to_string(),
    };
    url.query_pairs_mut().extend_pairs(pairs);
    format!("{}?{}", path, url.query().unwrap_or_default())
}
