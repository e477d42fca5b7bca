//! Resource wrappers over the backend REST API.
//!
//! Each wrapper borrows the shared [`ApiClient`] and maps one method to one
//! REST call. Read-mostly screens get fallback values on failure; writes
//! propagate their errors.

mod appointment_requests;
mod consultations;
mod diets;
mod gamification;
mod health;
mod pets;
mod profile;
mod sessions;

pub use appointment_requests::AppointmentRequestsApi;
pub use consultations::ConsultationsApi;
pub use diets::DietsApi;
pub use gamification::GamificationApi;
pub use health::HealthApi;
pub use pets::PetsApi;
pub use profile::ProfileApi;
pub use sessions::{login_error_message, SessionsApi};

use crate::auth::SessionPersistence;
use crate::http::ApiClient;

impl<S: SessionPersistence> ApiClient<S> {
    pub const fn sessions(&self) -> SessionsApi<'_, S> {
        SessionsApi { client: self }
    }

    pub const fn pets(&self) -> PetsApi<'_, S> {
        PetsApi { client: self }
    }

    pub const fn consultations(&self) -> ConsultationsApi<'_, S> {
        ConsultationsApi { client: self }
    }

    pub const fn appointment_requests(&self) -> AppointmentRequestsApi<'_, S> {
        AppointmentRequestsApi { client: self }
    }

    pub const fn diets(&self) -> DietsApi<'_, S> {
        DietsApi { client: self }
    }

    pub const fn gamification(&self) -> GamificationApi<'_, S> {
        GamificationApi { client: self }
    }

    pub const fn profile(&self) -> ProfileApi<'_, S> {
        ProfileApi { client: self }
    }

    pub const fn health(&self) -> HealthApi<'_, S> {
        HealthApi { client: self }
    }
}
