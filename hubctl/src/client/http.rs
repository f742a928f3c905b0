//! HTTP transport abstraction.
//!
//! This module defines the `HttpClient` trait to abstract HTTP request execution,
//! enabling testability with mock implementations. Status handling, JSON decoding and
//! the availability signal live one level up in [`ApiClient`](super::ApiClient); a
//! transport only moves bytes.

use crate::errors::{Error, Result};
use crate::types::{ACTOR_HEADER, UserId};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A request addressed relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/projects/3/checklist`
    pub path: String,
    /// JSON body, `None` for bodiless requests
    pub body: Option<serde_json::Value>,
    /// Acting user, sent as the actor header when present
    pub actor_user_id: Option<UserId>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            actor_user_id: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_actor(mut self, actor_user_id: Option<UserId>) -> Self {
        self.actor_user_id = actor_user_id;
        self
    }

    /// `"{METHOD} {path}"`, the key used for logging and by [`MockHttpClient`].
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Whether a method changes server state and therefore carries the actor header.
pub fn is_mutating(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with a JSON body
    pub fn json(value: serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for executing HTTP requests.
///
/// Implementations return `Ok` for every response the server produced, whatever its
/// status; `Err` is reserved for requests that never got an answer.
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: ensure_slash(&base_url),
        })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Other(anyhow::anyhow!("Invalid API path '{}': {}", path, e)))
    }
}

/// Makes sure a url has a trailing slash.
///
/// `Url::join` replaces the last path segment unless the base ends with '/', so
/// `http://host/api` joined with `users` would give `http://host/users`.
fn ensure_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut new_url = url.clone();
        let mut path = new_url.path().to_string();
        path.push('/');
        new_url.set_path(&path);
        new_url
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let url = self.url_for(&request.path)?;

        tracing::debug!(url = %url, "Executing HTTP request");

        let mut req = self.client.request(request.method.clone(), url.clone());

        if is_mutating(&request.method) {
            if let Some(actor) = request.actor_user_id {
                req = req.header(ACTOR_HEADER, actor.to_string());
                tracing::trace!(actor, "Added actor header");
            }
        }

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "HTTP request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

/// Mock HTTP client for testing.
///
/// Responses are queued per `"{METHOD} {path}"` key and handed out in FIFO order.
/// Every call is recorded, including calls that found no queued response.
///
/// # Example
/// ```
/// use hubctl::client::{HttpResponse, MockHttpClient};
///
/// let mock = MockHttpClient::new();
/// mock.add_response("GET /templates", Ok(HttpResponse::json(serde_json::json!([]))));
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<HttpResponse>>>>>,
    calls: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a method and path, e.g. `"PATCH /projects/1/checklist/2"`.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(response);
    }

    /// Queue a 200 response with a JSON body.
    pub fn add_json(&self, key: &str, body: serde_json::Value) {
        self.add_response(key, Ok(HttpResponse::json(body)));
    }

    pub fn get_calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    /// Calls whose `"{METHOD} {path}"` key matches exactly.
    pub fn calls_to(&self, key: &str) -> Vec<ApiRequest> {
        self.calls.lock().iter().filter(|c| c.key() == key).cloned().collect()
    }

    /// Calls made with the given method, any path.
    pub fn calls_with_method(&self, method: Method) -> Vec<ApiRequest> {
        self.calls.lock().iter().filter(|c| c.method == method).cloned().collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        self.calls.lock().push(request.clone());

        let key = request.key();
        if let Some(response) = self.responses.lock().get_mut(&key).and_then(|q| q.pop_front()) {
            return response;
        }

        Err(Error::Other(anyhow::anyhow!("No mock response configured for {}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_fifo_per_key() {
        let mock = MockHttpClient::new();
        mock.add_response("GET /users", Ok(HttpResponse::new(200, "first")));
        mock.add_response("GET /users", Ok(HttpResponse::new(500, "second")));

        let request = ApiRequest::new(Method::GET, "/users");
        assert_eq!(mock.execute(&request).await.unwrap().body, "first");
        assert_eq!(mock.execute(&request).await.unwrap().status, 500);
        assert!(mock.execute(&request).await.is_err());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_client_records_body_and_actor() {
        let mock = MockHttpClient::new();
        mock.add_json("POST /users", serde_json::json!({"id": 1}));

        let request = ApiRequest::new(Method::POST, "/users")
            .with_body(serde_json::json!({"name": "Ana"}))
            .with_actor(Some(9));
        mock.execute(&request).await.unwrap();

        let calls = mock.calls_to("POST /users");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].actor_user_id, Some(9));
        assert_eq!(calls[0].body.as_ref().unwrap()["name"], "Ana");
    }

    #[test]
    fn test_ensure_slash_preserves_prefix() {
        let client = ReqwestHttpClient::new(Url::parse("http://localhost:8000/api").unwrap(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.url_for("/users").unwrap().as_str(), "http://localhost:8000/api/users");
        assert_eq!(client.url_for("projects/2/checklist").unwrap().as_str(), "http://localhost:8000/api/projects/2/checklist");
    }

    #[test]
    fn test_mutating_methods() {
        assert!(!is_mutating(&Method::GET));
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PATCH));
        assert!(is_mutating(&Method::DELETE));
    }
}
