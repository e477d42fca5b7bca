//! Response envelope normalization.
//!
//! The backend wraps payloads inconsistently: some endpoints return the
//! resource itself, others nest it under `data`, and collections may come as
//! bare arrays or under `data`/`items`/`results`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, ApiResult};
use crate::auth::claims::identity_from_token;
use crate::auth::SessionUser;

const LIST_KEYS: [&str; 3] = ["data", "items", "results"];
const TOKEN_KEYS: [&str; 2] = ["access_token", "token"];

/// Returns the value nested under `data` when it holds an object or array.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map
                .get("data")
                .is_some_and(|data| data.is_object() || data.is_array()) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn extract_list<T: DeserializeOwned>(value: Value) -> ApiResult<Vec<T>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Null => Value::Array(Vec::new()),
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| map.remove(*key).filter(Value::is_array))
            .ok_or_else(|| {
                ApiError::InvalidPayload("expected a list or an enveloped list".to_string())
            })?,
        _ => {
            return Err(ApiError::InvalidPayload(
                "expected a list or an enveloped list".to_string(),
            ))
        }
    };
    Ok(serde_json::from_value(list)?)
}

/// Bearer token and user record extracted from a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub token: String,
    pub user: SessionUser,
}

/// Probes a login response for the token and user record.
///
/// The token is looked up under `access_token`, then `token`, at the top
/// level and then under `data`. When no user record is present, the user is
/// derived from the token claims.
pub fn probe_login(value: &Value) -> ApiResult<LoginPayload> {
    let nested = value.get("data").filter(|data| data.is_object());
    let scopes = std::iter::once(value).chain(nested);

    let token = scopes
        .clone()
        .find_map(|scope| {
            TOKEN_KEYS
                .iter()
                .find_map(|key| scope.get(*key).and_then(Value::as_str))
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidPayload("login response did not include a token".to_string())
        })?
        .to_string();

    let claims_user = || identity_from_token(&token).map(|identity| identity.into_session_user());
    let user = match scopes.clone().find_map(|scope| scope.get("user")) {
        Some(raw_user) => match serde_json::from_value::<SessionUser>(raw_user.clone()) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!("Unreadable user record in login response: {}", error);
                claims_user().ok_or(error)?
            }
        },
        None => claims_user().ok_or_else(|| {
            ApiError::InvalidPayload(
                "login response did not include a user and the token has no readable claims"
                    .to_string(),
            )
        })?,
    };

    Ok(LoginPayload { token, user })
}
