use reqwest::Method;

use crate::auth::SessionPersistence;
use crate::http::{path_segment, ApiClient, ApiResult};
use crate::models::{AppointmentRequest, NewAppointmentRequest};

const REQUESTS_ROUTE: &str = "/api/client/appointment-requests/";

pub struct AppointmentRequestsApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> AppointmentRequestsApi<'_, S> {
    pub async fn list(&self) -> ApiResult<Vec<AppointmentRequest>> {
        self.client.get_list(REQUESTS_ROUTE, &[]).await
    }

    /// Submits a request for the clinic to approve.
    pub async fn create(&self, request: &NewAppointmentRequest) -> ApiResult<AppointmentRequest> {
        let created: AppointmentRequest = self
            .client
            .send_json(Method::POST, REQUESTS_ROUTE, request)
            .await?;
        tracing::info!(animal_id = %created.animal_id, date = %created.date, "Appointment requested");
        Ok(created)
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("{REQUESTS_ROUTE}{}/", path_segment(id)))
            .await
    }
}
