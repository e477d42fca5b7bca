//! Consultation (appointment) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{date_prefix, parse_api_timestamp};

/// Bookable start times, every 30 minutes around the lunch break.
pub const CLINIC_TIME_SLOTS: [&str; 16] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

/// Backend-authoritative consultation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl ConsultationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub animal_id: String,
    /// `YYYY-MM-DD` or a full ISO datetime
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: ConsultationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<String>,
}

impl Consultation {
    /// Locally fabricated result for a booking the backend failed to store.
    pub fn placeholder(request: &NewConsultation, created_at_ms: i64) -> Self {
        Self {
            id: format!("appointment_{created_at_ms}"),
            animal_id: request.animal_id.clone(),
            date: request.date.clone(),
            start_time: Some(request.start_time.clone()),
            end_time: None,
            status: ConsultationStatus::Scheduled,
            description: Some(request.description.clone().unwrap_or_default()),
            service_type: Some(request.service_type.clone()),
            notes: Some(request.notes.clone().unwrap_or_default()),
            veterinarian: None,
        }
    }

    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        parse_api_timestamp(&self.date)
    }

    /// Start time trimmed to `HH:MM`.
    pub fn start_slot(&self) -> Option<&str> {
        self.start_time.as_deref().map(|time| time.get(..5).unwrap_or(time))
    }
}

/// Booking form for `POST /api/v1/appointments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsultation {
    pub animal_id: String,
    pub date: String,
    pub start_time: String,
    pub service_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewConsultation {
    /// Wire body; the backend computes `end_time`.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "animal_id": self.animal_id,
            "date": self.date,
            "start_time": self.start_time,
            "end_time": null,
            "status": ConsultationStatus::Scheduled.as_str(),
            "service_type": self.service_type,
            "description": self.description.clone().unwrap_or_default(),
            "notes": self.notes.clone().unwrap_or_default(),
        })
    }
}

/// Free slots on `date`, given every appointment the account has.
///
/// Cancelled appointments do not occupy their slot.
pub fn available_time_slots(appointments: &[Consultation], date: &str) -> Vec<String> {
    let target = date_prefix(date);
    let occupied = appointments
        .iter()
        .filter(|appointment| date_prefix(&appointment.date) == target)
        .filter(|appointment| appointment.status != ConsultationStatus::Cancelled)
        .filter_map(Consultation::start_slot)
        .collect::<Vec<_>>();

    CLINIC_TIME_SLOTS
        .iter()
        .filter(|slot| !occupied.contains(*slot))
        .map(|slot| (*slot).to_string())
        .collect()
}

/// Dashboard view: the nearest upcoming and the latest past consultation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationOverview {
    pub next: Option<Consultation>,
    pub last: Option<Consultation>,
}

impl ConsultationOverview {
    pub fn from_consultations(consultations: &[Consultation], now: DateTime<Utc>) -> Self {
        let dated = consultations
            .iter()
            .filter_map(|consultation| Some((consultation.scheduled_at()?, consultation)));

        let next = dated
            .clone()
            .filter(|(at, _)| *at > now)
            .min_by_key(|(at, _)| *at)
            .map(|(_, consultation)| consultation.clone());
        let last = dated
            .filter(|(at, _)| *at <= now)
            .max_by_key(|(at, _)| *at)
            .map(|(_, consultation)| consultation.clone());

        Self { next, last }
    }
}
