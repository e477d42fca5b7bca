use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::claims::identity_from_token;
use crate::auth::SessionPersistence;
use crate::http::{ApiClient, ApiError, ApiResult};
use crate::models::{ClientProfile, ProfileUpdate};

const PROFILE_ROUTE: &str = "/api/v1/client/profile/";
const CLINIC_PROFILE_ROUTE: &str = "/api/v1/auth/clinic/profile";

pub struct ProfileApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> ProfileApi<'_, S> {
    /// Profile of the signed-in client.
    ///
    /// Falls back to the stored token's claims, then to a placeholder
    /// profile, when the endpoint is unavailable.
    pub async fn get(&self) -> ClientProfile {
        match self.client.get_json::<ClientProfile>(PROFILE_ROUTE, &[]).await {
            Ok(profile) => return profile,
            Err(error) => {
                tracing::warn!("Profile endpoint unavailable, reading token claims: {}", error);
            }
        }

        let token = match self.client.session().store().load_token() {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!("Failed to read stored token: {}", error);
                None
            }
        };
        token
            .as_deref()
            .and_then(identity_from_token)
            .map(ClientProfile::from)
            .unwrap_or_default()
    }

    /// Updates name and/or phone.
    ///
    /// Backend builds disagree on the route and body shape, so known
    /// variants are tried in order. A 401 ends the chain.
    pub async fn update(&self, update: &ProfileUpdate) -> ApiResult<ClientProfile> {
        if update.is_empty() {
            return Err(ApiError::InvalidInput(
                "profile update has no fields".to_string(),
            ));
        }

        let attempts = [
            (
                Method::PUT,
                CLINIC_PROFILE_ROUTE,
                json!({ "name": update.name, "phone": update.phone }),
            ),
            (
                Method::PATCH,
                PROFILE_ROUTE,
                json!({ "tutor_name": update.name, "phone": update.phone }),
            ),
            (
                Method::PUT,
                PROFILE_ROUTE,
                json!({ "name": update.name, "phone": update.phone }),
            ),
        ];

        let mut last_error = None;
        for (method, route, body) in attempts {
            match self
                .client
                .send_json::<Value, ClientProfile>(method, route, &body)
                .await
            {
                Ok(profile) => {
                    tracing::info!(route, "Profile updated");
                    self.refresh_cached_user(&profile);
                    return Ok(profile);
                }
                Err(error) if error.is_unauthorized() => return Err(error),
                Err(error) => {
                    tracing::warn!(route, "Profile update attempt failed: {}", error);
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApiError::InvalidPayload("no profile update attempt was made".to_string())
        }))
    }

    fn refresh_cached_user(&self, profile: &ClientProfile) {
        let session = self.client.session();
        let Some(current) = session.current() else {
            return;
        };
        let mut user = current.user;
        user.name.clone_from(&profile.name);
        if !profile.phone.is_empty() {
            user.phone = Some(profile.phone.clone());
        }
        if let Err(error) = session.update_user(user) {
            tracing::warn!("Failed to refresh cached user record: {}", error);
        }
    }
}
