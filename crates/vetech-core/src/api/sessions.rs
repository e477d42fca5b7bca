use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::{AuthError, AuthResult, Session, SessionPersistence};
use crate::http::envelope::probe_login;
use crate::http::{ApiClient, ApiError};

const LOGIN_ROUTE: &str = "/login";
const LOGOUT_ROUTE: &str = "/logout";
const ME_ROUTE: &str = "/me";
const MIN_PASSWORD_LENGTH: usize = 6;

pub struct SessionsApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> SessionsApi<'_, S> {
    /// Exchanges credentials for a bearer token and persists the session.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = email.trim();
        validate_credentials(email, password)?;

        let body = json!({ "email": email, "senha": password });
        let response = self
            .client
            .send_value(Method::POST, LOGIN_ROUTE, &body)
            .await?;
        let login = probe_login(&response)?;
        self.client.session().establish(login.token, login.user)
    }

    /// Ends the session. Local state is cleared even when the backend call
    /// fails.
    pub async fn logout(&self) -> AuthResult<()> {
        if let Err(error) = self
            .client
            .send_empty::<Value>(Method::POST, LOGOUT_ROUTE, None)
            .await
        {
            tracing::warn!("Remote logout failed, clearing local session anyway: {}", error);
        }
        self.client.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Whether the backend still accepts the stored token.
    pub async fn validate_token(&self) -> bool {
        match self.client.get_value(ME_ROUTE, &[]).await {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!("Stored token rejected: {}", error);
                false
            }
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.is_empty() {
        return Err(AuthError::InvalidCredentials(
            "Por favor, digite seu email".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AuthError::InvalidCredentials(
            "Por favor, digite um email válido".to_string(),
        ));
    }
    if password.trim().is_empty() {
        return Err(AuthError::InvalidCredentials(
            "Por favor, digite sua senha".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidCredentials(
            "A senha deve ter pelo menos 6 caracteres".to_string(),
        ));
    }
    Ok(())
}

/// User-facing message for a failed login.
pub fn login_error_message(error: &AuthError) -> String {
    let message = match error {
        AuthError::InvalidCredentials(message) => return message.clone(),
        AuthError::Api(api_error) => match api_error {
            ApiError::Status { status: 401, .. } => "Email ou senha incorretos",
            ApiError::Status { status: 404, .. } => "Usuário não encontrado",
            ApiError::Http(_) => "Erro de conexão. Verifique sua internet.",
            _ => "Erro ao fazer login. Tente novamente.",
        },
        AuthError::Json(_) | AuthError::SecureStorage(_) => {
            "Erro ao fazer login. Tente novamente."
        }
    };
    message.to_string()
}
