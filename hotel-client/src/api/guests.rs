//! Guest endpoints

use shared::models::{Guest, GuestCreate, GuestEnvelope, GuestList};
use shared::response::ApiResponse;

use super::{HotelApi, into_data, with_query};
use crate::{ClientResult, HttpClient};

impl<H: HttpClient> HotelApi<H> {
    /// `GET /guests?email=`; the email is trimmed and lowercased
    pub async fn find_guest_by_email(&self, email: &str) -> ClientResult<Option<Guest>> {
        let path = with_query("guests", &[("email", email.trim().to_lowercase())]);
        let resp: ApiResponse<GuestList> = self.http.get(&path).await?;
        Ok(into_data(resp, "guests")?.guests.into_iter().next())
    }

    /// `POST /guests`
    pub async fn create_guest(&self, guest: &GuestCreate) -> ClientResult<Guest> {
        let resp: ApiResponse<GuestEnvelope> = self.http.post("guests", guest).await?;
        Ok(into_data(resp, "guest")?.guest)
    }

    /// `GET /guests/me`: the guest profile of the signed-in user, created on demand
    pub async fn my_guest_profile(&self) -> ClientResult<Guest> {
        let resp: ApiResponse<GuestEnvelope> = self.http.get("guests/me").await?;
        Ok(into_data(resp, "guest")?.guest)
    }
}
