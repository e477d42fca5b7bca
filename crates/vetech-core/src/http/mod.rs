//! Authenticated HTTP pipeline shared by every resource wrapper.
//!
//! Outgoing requests carry the stored bearer token when one exists. A 401
//! response clears the stored token before the error reaches the caller.
//! Nothing is retried.

pub mod envelope;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::auth::{SessionManager, SessionPersistence};
use crate::config::ClientConfig;
use crate::util::compact_text;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {message} ({status})")]
    Status { status: u16, message: String },
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected response payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    pub const fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Message extracted from the backend error body, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Query parameters as name/value pairs.
pub type Query<'a> = [(&'a str, String)];

/// The single shared backend client.
#[derive(Clone)]
pub struct ApiClient<S: SessionPersistence> {
    base_url: String,
    client: Client,
    session: SessionManager<S>,
}

impl<S: SessionPersistence> ApiClient<S> {
    pub fn new(config: &ClientConfig, store: S) -> ApiResult<Self> {
        let config = config
            .clone()
            .validated()
            .map_err(|error| ApiError::InvalidConfiguration(error.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.api_base_url,
            client,
            session: SessionManager::new(store),
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub async fn get_value(&self, route: &str, query: &Query<'_>) -> ApiResult<Value> {
        let request = self.request(Method::GET, route).query(query);
        let response = self.execute(request, route).await?;
        read_json_value(response).await
    }

    /// GET a single resource, unwrapping a `data` envelope when present.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        route: &str,
        query: &Query<'_>,
    ) -> ApiResult<T> {
        let value = self.get_value(route, query).await?;
        Ok(serde_json::from_value(envelope::unwrap_data(value))?)
    }

    /// GET a collection, accepting a bare array or an enveloped one.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        route: &str,
        query: &Query<'_>,
    ) -> ApiResult<Vec<T>> {
        let value = self.get_value(route, query).await?;
        envelope::extract_list(value)
    }

    pub async fn send_value<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &str,
        body: &B,
    ) -> ApiResult<Value> {
        let request = self.request(method, route).json(body);
        let response = self.execute(request, route).await?;
        read_json_value(response).await
    }

    /// Sends a JSON body and decodes the (possibly enveloped) response.
    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        route: &str,
        body: &B,
    ) -> ApiResult<T> {
        let value = self.send_value(method, route, body).await?;
        Ok(serde_json::from_value(envelope::unwrap_data(value))?)
    }

    /// Sends a request whose response body is ignored.
    pub async fn send_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        let mut request = self.request(method, route);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, route).await?;
        Ok(())
    }

    pub async fn delete(&self, route: &str) -> ApiResult<()> {
        self.send_empty::<Value>(Method::DELETE, route, None).await
    }

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, route))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.store().load_token() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(error) => {
                tracing::debug!("Sending unauthenticated request, token lookup failed: {}", error);
                request
            }
        }
    }

    async fn execute(&self, request: RequestBuilder, route: &str) -> ApiResult<Response> {
        let response = self.authorize(request).send().await.map_err(|error| {
            tracing::warn!(route, "Request failed: {}", error);
            ApiError::Http(error)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(route, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(route, "Backend rejected credentials, clearing stored token");
            if let Err(error) = self.session.invalidate_token() {
                tracing::warn!("Failed to clear stored token: {}", error);
            }
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_api_error(status, &body);
        tracing::warn!(route, status = status.as_u16(), "Request rejected: {}", message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Percent-encodes a value for use as a single path segment.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

async fn read_json_value(response: Response) -> ApiResult<Value> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<Value>,
    message: Option<String>,
    error: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
        let detail = payload.detail.map(|detail| match detail {
            Value::String(text) => text,
            other => other.to_string(),
        });
        if let Some(message) = detail.or(payload.message).or(payload.error) {
            return message.trim().to_string();
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}
