//! Bearer token claims, read without a network call.
//!
//! The payload segment is only decoded, never verified. Use the result for
//! display purposes, never for authorization decisions.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SessionUser, DEFAULT_DISPLAY_NAME};

const DEFAULT_ROLE: &str = "tutor";

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token must have 3 dot-separated segments, found {0}")]
    Format(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub animal_id: Option<String>,
    #[serde(default)]
    pub clinic_id: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub temporary_password: Option<bool>,
}

/// Display fields derived from the claims, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub animal_id: Option<String>,
    pub clinic_id: Option<String>,
}

impl TokenIdentity {
    pub fn from_claims(claims: TokenClaims) -> Self {
        let metadata = claims.user_metadata.unwrap_or_default();
        Self {
            id: claims.sub.unwrap_or_default(),
            name: non_empty_or(metadata.name, DEFAULT_DISPLAY_NAME),
            email: claims.email.unwrap_or_default(),
            phone: metadata.phone.unwrap_or_default(),
            role: non_empty_or(metadata.role, DEFAULT_ROLE),
            animal_id: metadata.animal_id,
            clinic_id: metadata.clinic_id,
        }
    }

    pub fn into_session_user(self) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: Some(self.phone).filter(|phone| !phone.is_empty()),
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Decodes the payload segment of a compact token.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let segments = token.trim().split('.').collect::<Vec<_>>();
    if segments.len() != 3 {
        return Err(ClaimsError::Format(segments.len()));
    }

    let bytes = STANDARD.decode(to_standard_base64(segments[1]))?;
    let payload = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&payload)?)
}

/// Display identity for a token, or `None` when it cannot be decoded.
pub fn identity_from_token(token: &str) -> Option<TokenIdentity> {
    match decode_claims(token) {
        Ok(claims) => Some(TokenIdentity::from_claims(claims)),
        Err(error) => {
            tracing::debug!("Token claims unavailable: {}", error);
            None
        }
    }
}

/// Encodes a JSON payload as a base64url segment without padding.
pub fn encode_payload_segment(payload: &serde_json::Value) -> String {
    URL_SAFE_NO_PAD.encode(payload.to_string())
}

fn to_standard_base64(segment: &str) -> String {
    let mut converted = segment
        .trim_end_matches('=')
        .chars()
        .map(|character| match character {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect::<String>();
    while converted.len() % 4 != 0 {
        converted.push('=');
    }
    converted
}
