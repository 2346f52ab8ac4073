//! Backend API client
//!
//! Stateless translation of typed calls into REST requests. Any failure is
//! replaced by an [`ApiError::Failed`] whose message is the backend's own
//! error string when it sent one, else a fixed phrase for the operation.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::api::{AuthApi, InstanceApi, MetricsApi};
use super::http::HttpClient;
use super::models::{
    Credentials, DecisionQuery, DecisionsResponse, Instance, InstancesResponse, LoginResponse,
    MessageResponse, MetricSample, MetricsResponse, NewInstance, RegisterInstanceResponse,
    RegisterResponse, SimulateRequest, SimulateResponse, UserProfile,
};
use crate::error::{ApiError, Error, Result};

/// Typed client for the scaling monitor backend
#[derive(Clone)]
pub struct BackendClient {
    http: Arc<HttpClient>,
}

impl BackendClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

/// Fold any failure into the single message the caller will display
fn normalize(err: Error, fallback: &str) -> Error {
    debug!("{}: {}", fallback, err);
    let (message, status) = match &err {
        Error::Api(api) => (api.backend_message().map(str::to_string), api.status()),
        _ => (None, None),
    };
    ApiError::Failed {
        message: message.unwrap_or_else(|| fallback.to_string()),
        status,
    }
    .into()
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.http
            .post("/api/auth/login", credentials)
            .await
            .map_err(|e| normalize(e, "Login failed."))
    }

    async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse> {
        self.http
            .post("/api/auth/register", credentials)
            .await
            .map_err(|e| normalize(e, "Registration failed."))
    }

    async fn me(&self) -> Result<UserProfile> {
        self.http
            .get("/api/auth/me", &[])
            .await
            .map_err(|e| normalize(e, "Failed to fetch user profile."))
    }
}

#[async_trait]
impl InstanceApi for BackendClient {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        let response: InstancesResponse = self
            .http
            .get("/api/instances/", &[])
            .await
            .map_err(|e| normalize(e, "Failed to fetch instances."))?;
        Ok(response.instances)
    }

    async fn register_instance(&self, instance: &NewInstance) -> Result<RegisterInstanceResponse> {
        self.http
            .post("/api/instances/", instance)
            .await
            .map_err(|e| normalize(e, "Failed to register instance."))
    }

    async fn start_monitoring(&self, instance_id: &str) -> Result<String> {
        let path = format!("/api/instances/{}/monitor/start", instance_id);
        let response: MessageResponse = self
            .http
            .patch(&path)
            .await
            .map_err(|e| normalize(e, "Failed to start monitoring."))?;
        Ok(response.message)
    }

    async fn stop_monitoring(&self, instance_id: &str) -> Result<String> {
        let path = format!("/api/instances/{}/monitor/stop", instance_id);
        let response: MessageResponse = self
            .http
            .patch(&path)
            .await
            .map_err(|e| normalize(e, "Failed to stop monitoring."))?;
        Ok(response.message)
    }

    async fn delete_instance(&self, instance_id: &str) -> Result<String> {
        let path = format!("/api/instances/{}", instance_id);
        let response: MessageResponse = self
            .http
            .delete(&path)
            .await
            .map_err(|e| normalize(e, "Failed to delete instance."))?;
        Ok(response.message)
    }
}

#[async_trait]
impl MetricsApi for BackendClient {
    async fn get_metrics(&self, instance_id: &str, limit: usize) -> Result<Vec<MetricSample>> {
        let path = format!("/api/metrics/{}", instance_id);
        let response: MetricsResponse = self
            .http
            .get(&path, &[("limit", limit.to_string())])
            .await
            .map_err(|e| normalize(e, "Failed to fetch metrics."))?;
        Ok(response.metrics)
    }

    async fn get_decisions(
        &self,
        instance_id: &str,
        query: DecisionQuery,
    ) -> Result<DecisionsResponse> {
        let path = format!("/api/metrics/decisions/{}", instance_id);
        self.http
            .get(&path, &query.to_query_params())
            .await
            .map_err(|e| normalize(e, "Failed to fetch scaling decisions."))
    }

    async fn simulate(&self, request: &SimulateRequest) -> Result<SimulateResponse> {
        self.http
            .post("/api/metrics/simulate", request)
            .await
            .map_err(|e| normalize(e, "Failed to simulate metrics."))
    }
}
