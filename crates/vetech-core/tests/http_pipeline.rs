// Bearer injection, 401 handling and session lifecycle against a mock backend.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;
use vetech_core::auth::{AuthResult, TOKEN_KEY, USER_KEY};
use vetech_core::{
    ApiClient, ClientConfig, MemorySessionStore, SessionPersistence, SessionUser,
};

/// Memory store that counts token removals.
#[derive(Clone, Default)]
struct CountingStore {
    inner: MemorySessionStore,
    token_removals: Arc<AtomicUsize>,
}

impl SessionPersistence for CountingStore {
    fn read_entry(&self, key: &str) -> AuthResult<Option<String>> {
        self.inner.read_entry(key)
    }

    fn write_entry(&self, key: &str, value: &str) -> AuthResult<()> {
        self.inner.write_entry(key, value)
    }

    fn remove_entry(&self, key: &str) -> AuthResult<()> {
        if key == TOKEN_KEY {
            self.token_removals.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.remove_entry(key)
    }
}

fn user() -> SessionUser {
    SessionUser {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        phone: None,
    }
}

fn client<S: SessionPersistence>(server: &Server, store: S) -> ApiClient<S> {
    let config = ClientConfig::new(server.url()).unwrap();
    ApiClient::new(&config, store).unwrap()
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/animals")
        .match_header("authorization", "Bearer stored-token")
        .with_status(200)
        .with_body(r#"[{ "id": "p1", "name": "Rex", "species": "Cachorro" }]"#)
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    store.write_entry(TOKEN_KEY, "stored-token").unwrap();
    let api = client(&server, store);

    let pets = api.pets().list().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Rex");
    mock.assert_async().await;
}

#[tokio::test]
async fn requests_without_token_carry_no_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/animals")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{ "data": [] }"#)
        .create_async()
        .await;

    let api = client(&server, MemorySessionStore::default());
    assert!(api.pets().list().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_clears_token_once_and_propagates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/appointments")
        .with_status(401)
        .with_body(r#"{ "detail": "Token expirado" }"#)
        .expect(1)
        .create_async()
        .await;

    let store = CountingStore::default();
    store.write_entry(TOKEN_KEY, "expired").unwrap();
    store
        .write_entry(USER_KEY, &serde_json::to_string(&user()).unwrap())
        .unwrap();
    let api = client(&server, store.clone());
    assert!(api.session().restore().is_some());

    let error = api.consultations().list().await.unwrap_err();
    assert!(error.is_unauthorized());
    assert!(!api.session().is_authenticated());
    assert!(api.session().current().is_none());
    assert_eq!(error.backend_message(), Some("Token expirado"));
    assert_eq!(store.token_removals.load(Ordering::SeqCst), 1);
    assert_eq!(store.load_token().unwrap(), None);
    assert!(store.read_entry(USER_KEY).unwrap().is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn login_persists_exact_values() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_body(Matcher::Json(json!({ "email": "ana@example.com", "senha": "secret1" })))
        .with_status(200)
        .with_body(
            json!({
                "access_token": "fresh-token",
                "user": { "id": "u1", "nome": "Ana", "email": "ana@example.com" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    let api = client(&server, store.clone());

    let session = api
        .sessions()
        .login(" ana@example.com ", "secret1")
        .await
        .unwrap();

    assert_eq!(session.token, "fresh-token");
    assert_eq!(store.load_token().unwrap().as_deref(), Some("fresh-token"));
    assert_eq!(store.load_user().unwrap(), Some(user()));
    assert!(api.session().is_authenticated());
    mock.assert_async().await;
}

#[tokio::test]
async fn login_accepts_numeric_user_id_and_mixed_spellings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .with_status(200)
        .with_body(
            json!({
                "token": "numeric-token",
                "user": {
                    "id": 42,
                    "nome": "Ana",
                    "name": "Ana Paula",
                    "telefone": "21 5555",
                    "email": "ana@example.com"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    let api = client(&server, store.clone());

    let session = api
        .sessions()
        .login("ana@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(session.user.id, "42");
    assert_eq!(session.user.name, "Ana Paula");
    assert_eq!(session.user.phone.as_deref(), Some("21 5555"));
    assert_eq!(store.load_user().unwrap(), Some(session.user));
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/login")
        .with_status(401)
        .with_body(r#"{ "detail": "Invalid credentials" }"#)
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    let api = client(&server, store.clone());

    let error = api
        .sessions()
        .login("ana@example.com", "wrong-pass")
        .await
        .unwrap_err();
    assert_eq!(
        vetech_core::api::login_error_message(&error),
        "Email ou senha incorretos"
    );
    assert_eq!(store.load_session().unwrap(), None);
}

#[tokio::test]
async fn logout_clears_session_when_backend_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/logout")
        .with_status(503)
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    let api = client(&server, store.clone());
    api.session().establish("token", user()).unwrap();

    api.sessions().logout().await.unwrap();

    assert_eq!(store.read_entry(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.read_entry(USER_KEY).unwrap(), None);
    assert!(!api.session().is_authenticated());
    mock.assert_async().await;
}

#[tokio::test]
async fn logout_clears_session_when_backend_succeeds() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/logout")
        .with_status(204)
        .create_async()
        .await;

    let store = MemorySessionStore::default();
    let api = client(&server, store.clone());
    api.session().establish("token", user()).unwrap();

    api.sessions().logout().await.unwrap();
    assert_eq!(store.load_session().unwrap(), None);
}

#[tokio::test]
async fn validate_token_reports_backend_verdict() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/me")
        .with_status(200)
        .with_body(r#"{ "id": "u1" }"#)
        .create_async()
        .await;

    let api = client(&server, MemorySessionStore::default());
    assert!(api.sessions().validate_token().await);
    ok.assert_async().await;
    ok.remove_async().await;

    let _rejected = server
        .mock("GET", "/me")
        .with_status(401)
        .create_async()
        .await;
    assert!(!api.sessions().validate_token().await);
}
