//! Incident reporting

use shared::models::{Incident, IncidentCreate};

use crate::api::HotelApi;
use crate::client::HttpClient;
use crate::error::ClientResult;
use crate::validation::validate_incident;

/// Validate locally, then `POST /incidents`
pub async fn report_incident<H: HttpClient>(
    api: &HotelApi<H>,
    incident: &IncidentCreate,
) -> ClientResult<Incident> {
    validate_incident(incident)?;
    let created = api.create_incident(incident).await?;
    tracing::info!(
        id = created.id,
        kind = ?created.incident_type,
        priority = ?created.priority,
        "Incident reported"
    );
    Ok(created)
}
