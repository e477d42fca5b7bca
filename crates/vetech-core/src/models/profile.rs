//! Client (tutor) profile model

use serde::{Deserialize, Serialize};

use crate::auth::claims::TokenIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: String,
    #[serde(alias = "tutor_name", alias = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "telefone")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Shown when neither the backend nor the token can describe the user.
impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            id: "temp-id".to_string(),
            name: "Usuário".to_string(),
            email: "email@exemplo.com".to_string(),
            phone: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<TokenIdentity> for ClientProfile {
    fn from(identity: TokenIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            phone: identity.phone,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::auth::claims::{decode_claims, encode_payload_segment};

    #[test]
    fn profile_from_token_identity() {
        let token = format!(
            "h.{}.s",
            encode_payload_segment(&json!({
                "sub": "u1",
                "email": "ana@x.io",
                "user_metadata": { "name": "Ana Luísa" }
            }))
        );
        let identity = TokenIdentity::from_claims(decode_claims(&token).unwrap());
        let profile = ClientProfile::from(identity);
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.name, "Ana Luísa");
        assert_eq!(profile.phone, "");
    }

    #[test]
    fn profile_accepts_tutor_name() {
        let profile: ClientProfile = serde_json::from_value(json!({
            "id": "u2",
            "tutor_name": "Bruno",
            "email": "b@x.io",
            "phone": "119999"
        }))
        .unwrap();
        assert_eq!(profile.name, "Bruno");
    }

    #[test]
    fn default_profile_is_placeholder() {
        let profile = ClientProfile::default();
        assert_eq!(profile.id, "temp-id");
        assert_eq!(profile.email, "email@exemplo.com");
        assert!(ProfileUpdate::default().is_empty());
    }
}
