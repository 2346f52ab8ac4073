//! Request/response pipeline shared by every backend call
//!
//! Outbound, the current bearer token (if any) is attached to the request.
//! Inbound, a 401 triggers [`Session::forced_logout`] before the error is
//! returned; every other status is handed back untouched for the caller to
//! interpret. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::Session;
use crate::error::{ApiError, Result};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Single outbound gateway to the backend
pub struct HttpClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("scalectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let builder = self.builder(Method::GET, path).query(query);
        self.send(builder, Method::GET, path).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.builder(Method::POST, path).json(body);
        self.send(builder, Method::POST, path).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.builder(Method::PATCH, path);
        self.send(builder, Method::PATCH, path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.builder(Method::DELETE, path);
        self.send(builder, Method::DELETE, path).await
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        // Outbound stage
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T> {
        debug!("{} {}", method, path);
        let response = builder.send().await.map_err(ApiError::from)?;

        // Inbound stage
        let status = response.status();
        debug!("{} {} -> {}", method, path, status.as_u16());

        if status.is_success() {
            let data = response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return Ok(data);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        };

        if err.is_unauthorized() {
            self.session.forced_logout();
        }

        Err(err.into())
    }
}

/// Pull the human-readable error out of a backend error body.
///
/// The backend is not consistent about the field name, so `error`,
/// `message` and `detail` are tried in that order.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message", "detail"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
