//! Client for the ImplantHub REST API.
//!
//! [`ApiClient`] wraps an [`HttpClient`] transport and adds everything the rest of the
//! crate relies on:
//!
//! - non-success statuses become [`Error::Api`] with the response text (or the status
//!   reason phrase when the body is empty)
//! - successful bodies are decoded into typed models, which is where response shape is
//!   validated
//! - the actor header is attached to every mutating call when an actor is configured
//! - every outcome is written to the shared [`ApiStatus`]
//!
//! Typed wrappers for each route live in [`endpoints`].

pub mod endpoints;
pub mod http;
pub mod status;

pub use http::{ApiRequest, HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient, is_mutating};
pub use status::{ApiHealth, ApiStatus};

use crate::errors::{Error, Result};
use crate::types::UserId;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ApiClient<H: HttpClient = ReqwestHttpClient> {
    http: H,
    actor_user_id: Option<UserId>,
    status: ApiStatus,
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
            actor_user_id: None,
            status: ApiStatus::new(),
        }
    }

    /// Attribute subsequent mutating calls to `actor_user_id`; `None` sends no actor header.
    pub fn with_actor(mut self, actor_user_id: Option<UserId>) -> Self {
        self.actor_user_id = actor_user_id;
        self
    }

    /// Handle on the shared availability signal.
    pub fn status(&self) -> &ApiStatus {
        &self.status
    }

    /// Issue a request and decode the JSON response into `T`.
    pub async fn request<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<T> {
        let response = self.send(method, path, body).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            warn!(path, error = %e, "Response body did not match the expected shape");
            let err = Error::Decode(e);
            self.status.record_failure(err.to_string());
            err
        })
    }

    /// Issue a request whose response body is irrelevant.
    pub async fn request_empty(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<()> {
        self.send(method, path, body).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request_empty(Method::DELETE, path, None).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<http::HttpResponse> {
        let actor = if is_mutating(&method) { self.actor_user_id } else { None };
        let mut request = ApiRequest::new(method, path).with_actor(actor);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        debug!(request = %request.key(), actor = ?actor, "Dispatching API request");
        self.status.begin_attempt();

        let response = match self.http.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(request = %request.key(), error = %e, "API request did not complete");
                self.status.record_failure(e.to_string());
                return Err(e);
            }
        };

        if !response.is_success() {
            let err = Error::from_response(response.status, &response.body);
            warn!(request = %request.key(), status = response.status, "API request failed");
            self.status.record_failure(err.to_string());
            return Err(err);
        }

        self.status.record_success();
        Ok(response)
    }
}
