//! Appointment request model
//!
//! Requests are proposals the clinic approves or rejects, unlike
//! consultations which are booked directly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentPriority {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppointmentRequestStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub animal_id: String,
    pub service_type: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: AppointmentPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentRequestStatus>,
}

/// Body of `POST /api/client/appointment-requests/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointmentRequest {
    pub animal_id: String,
    pub service_type: String,
    pub date: String,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: AppointmentPriority,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_body_matches_backend_shape() {
        let request = NewAppointmentRequest {
            animal_id: "c7020821".to_string(),
            service_type: "Consulta veterinária".to_string(),
            date: "2025-11-15".to_string(),
            start_time: "14:00:00".to_string(),
            end_time: "15:00:00".to_string(),
            notes: None,
            priority: AppointmentPriority::High,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "animal_id": "c7020821",
                "service_type": "Consulta veterinária",
                "date": "2025-11-15",
                "start_time": "14:00:00",
                "end_time": "15:00:00",
                "priority": "high"
            })
        );
    }

    #[test]
    fn request_status_is_optional() {
        let parsed: AppointmentRequest = serde_json::from_value(json!({
            "id": "r1",
            "animal_id": "a",
            "service_type": "Banho",
            "date": "2025-11-15",
            "start_time": "14:00:00",
            "end_time": "15:00:00",
            "priority": "low"
        }))
        .unwrap();
        assert_eq!(parsed.status, None);
        assert_eq!(parsed.priority, AppointmentPriority::Low);
    }
}
