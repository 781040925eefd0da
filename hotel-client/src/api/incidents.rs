//! Incident endpoints

use shared::models::{Incident, IncidentCreate, IncidentEnvelope};
use shared::response::ApiResponse;

use super::{HotelApi, into_data};
use crate::{ClientResult, HttpClient};

impl<H: HttpClient> HotelApi<H> {
    /// `POST /incidents`
    pub async fn create_incident(&self, incident: &IncidentCreate) -> ClientResult<Incident> {
        let resp: ApiResponse<IncidentEnvelope> = self.http.post("incidents", incident).await?;
        Ok(into_data(resp, "incident")?.incident)
    }
}
