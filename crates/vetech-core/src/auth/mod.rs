//! Session persistence and bootstrap.
//!
//! The backend issues a bearer token at login. The client keeps exactly two
//! key-value entries: the token and the serialized user record.

pub mod claims;
mod memory;

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::ApiError;
use crate::util::string_or_number;

pub use memory::MemorySessionStore;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "userToken";
/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "userData";

/// Display name used when neither the backend nor the token provide one.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuário";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Cached user record, stored verbatim next to the token.
///
/// Written with Portuguese keys; read from either spelling, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionUserRecord")]
pub struct SessionUser {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Deserialize)]
struct SessionUserRecord {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    telefone: Option<String>,
}

impl From<SessionUserRecord> for SessionUser {
    fn from(record: SessionUserRecord) -> Self {
        Self {
            id: record.id,
            name: record
                .name
                .or(record.nome)
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            email: record.email.unwrap_or_default(),
            phone: record.phone.or(record.telefone),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Key-value backend for the two session entries.
///
/// Implementors only provide raw entry access; the session-level operations
/// are derived from it.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn read_entry(&self, key: &str) -> AuthResult<Option<String>>;
    fn write_entry(&self, key: &str, value: &str) -> AuthResult<()>;
    fn remove_entry(&self, key: &str) -> AuthResult<()>;

    fn load_token(&self) -> AuthResult<Option<String>> {
        self.read_entry(TOKEN_KEY)
    }

    fn load_user(&self) -> AuthResult<Option<SessionUser>> {
        match self.read_entry(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Returns the stored session when both entries are present.
    fn load_session(&self) -> AuthResult<Option<Session>> {
        let Some(token) = self.load_token()? else {
            return Ok(None);
        };
        let Some(user) = self.load_user()? else {
            return Ok(None);
        };
        Ok(Some(Session { token, user }))
    }

    fn save_session(&self, session: &Session) -> AuthResult<()> {
        let serialized_user = serde_json::to_string(&session.user)?;
        self.write_entry(TOKEN_KEY, &session.token)?;
        self.write_entry(USER_KEY, &serialized_user)
    }

    fn clear_token(&self) -> AuthResult<()> {
        self.remove_entry(TOKEN_KEY)
    }

    /// Removes both entries. Both removals are attempted even if the first fails.
    fn clear_session(&self) -> AuthResult<()> {
        let token_result = self.remove_entry(TOKEN_KEY);
        let user_result = self.remove_entry(USER_KEY);
        token_result.and(user_result)
    }
}

/// In-memory session state mirrored to a persistent store.
#[derive(Clone)]
pub struct SessionManager<S: SessionPersistence> {
    store: S,
    current: Arc<RwLock<Option<Session>>>,
}

impl<S: SessionPersistence> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Restores a previously stored session without touching the network.
    ///
    /// Read or parse failures are logged and treated as "no session".
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.store.load_session() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!("Failed to restore stored session: {}", error);
                None
            }
        };
        self.set_current(restored.clone());
        restored
    }

    /// Persists a freshly issued session, then makes it current.
    pub fn establish(&self, token: impl Into<String>, user: SessionUser) -> AuthResult<Session> {
        let session = Session {
            token: token.into(),
            user,
        };
        self.store.save_session(&session)?;
        self.set_current(Some(session.clone()));
        tracing::info!(user_id = %session.user.id, "Session established");
        Ok(session)
    }

    /// Replaces the cached user record, keeping the current token.
    pub fn update_user(&self, user: SessionUser) -> AuthResult<Option<Session>> {
        let Some(current) = self.current() else {
            return Ok(None);
        };
        self.establish(current.token, user).map(Some)
    }

    /// Drops the session locally. Both stored entries are gone afterwards.
    pub fn clear(&self) -> AuthResult<()> {
        self.set_current(None);
        self.store.clear_session()
    }

    /// Forgets a token the backend rejected. The cached user record stays
    /// stored, but nothing is current until the next login.
    pub fn invalidate_token(&self) -> AuthResult<()> {
        self.set_current(None);
        self.store.clear_token()
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    fn set_current(&self, session: Option<Session>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session;
    }
}
