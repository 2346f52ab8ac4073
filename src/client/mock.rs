//! Mock backend client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, InstanceApi, MetricsApi};
use super::models::{
    Credentials, DecisionQuery, DecisionsResponse, Instance, LoginResponse, MetricSample,
    NewInstance, RegisterInstanceResponse, RegisterResponse, ScalingDecision, SimulateRequest,
    SimulateResponse, UserProfile,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockBackendClient::new()
///     .with_metrics(vec![sample("2024-05-01T10:00:00", 42.0)])
///     .await;
///
/// let metrics = mock.get_metrics("i-1", 50).await?;
/// assert_eq!(metrics.len(), 1);
/// ```
#[derive(Default)]
pub struct MockBackendClient {
    /// Instances to return from list_instances
    instances: Arc<Mutex<Vec<Instance>>>,
    /// Samples to return from get_metrics
    metrics: Arc<Mutex<Vec<MetricSample>>>,
    /// Decisions to return from get_decisions
    decisions: Arc<Mutex<Vec<ScalingDecision>>>,
    /// Token to return from login
    token: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// When set, every call fails
    failing: Arc<Mutex<bool>>,
    /// Artificial latency for successive get_metrics calls
    metrics_delays: Arc<Mutex<VecDeque<Duration>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub register: usize,
    pub me: usize,
    pub list_instances: usize,
    pub register_instance: usize,
    pub start_monitoring: usize,
    pub stop_monitoring: usize,
    pub delete_instance: usize,
    pub get_metrics: usize,
    pub get_decisions: usize,
    pub simulate: usize,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "get_metrics")
    pub method: &'static str,
    /// Instance the call was about, if any
    pub instance_id: Option<String>,
}

impl MockBackendClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure instances to return from list_instances.
    pub async fn with_instances(self, instances: Vec<Instance>) -> Self {
        *self.instances.lock().await = instances;
        self
    }

    /// Configure samples to return from get_metrics.
    pub async fn with_metrics(self, metrics: Vec<MetricSample>) -> Self {
        *self.metrics.lock().await = metrics;
        self
    }

    /// Configure decisions to return from get_decisions.
    pub async fn with_decisions(self, decisions: Vec<ScalingDecision>) -> Self {
        *self.decisions.lock().await = decisions;
        self
    }

    /// Configure the token returned from login.
    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(token.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Replace the samples returned from get_metrics.
    pub async fn set_metrics(&self, metrics: Vec<MetricSample>) {
        *self.metrics.lock().await = metrics;
    }

    /// Make every subsequent call fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.lock().await = failing;
    }

    /// Delay the next get_metrics calls by the given durations, in order.
    pub async fn push_metrics_delay(&self, delay: Duration) {
        self.metrics_delays.lock().await.push_back(delay);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Instance ids of every get_metrics call, in call order.
    pub async fn metrics_subjects(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == "get_metrics")
            .filter_map(|r| r.instance_id.clone())
            .collect()
    }

    async fn record(&self, method: &'static str, instance_id: Option<&str>) -> Result<()> {
        {
            let mut counts = self.call_count.lock().await;
            match method {
                "login" => counts.login += 1,
                "register" => counts.register += 1,
                "me" => counts.me += 1,
                "list_instances" => counts.list_instances += 1,
                "register_instance" => counts.register_instance += 1,
                "start_monitoring" => counts.start_monitoring += 1,
                "stop_monitoring" => counts.stop_monitoring += 1,
                "delete_instance" => counts.delete_instance += 1,
                "get_metrics" => counts.get_metrics += 1,
                "get_decisions" => counts.get_decisions += 1,
                "simulate" => counts.simulate += 1,
                _ => {}
            }
        }
        self.captured_requests.lock().await.push(CapturedRequest {
            method,
            instance_id: instance_id.map(str::to_string),
        });

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        if *self.failing.lock().await {
            return Err(ApiError::Failed {
                message: format!("{method} failed"),
                status: Some(503),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockBackendClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.record("login", None).await?;
        let token = self.token.lock().await.clone().unwrap_or_default();
        Ok(LoginResponse {
            message: format!("Welcome {}", credentials.email),
            token,
            user_id: "1".to_string(),
        })
    }

    async fn register(&self, _credentials: &Credentials) -> Result<RegisterResponse> {
        self.record("register", None).await?;
        Ok(RegisterResponse {
            message: "User registered".to_string(),
            user_id: "1".to_string(),
        })
    }

    async fn me(&self) -> Result<UserProfile> {
        self.record("me", None).await?;
        let instances = self.instances.lock().await;
        Ok(UserProfile {
            user_id: "1".to_string(),
            email: "a@b.com".to_string(),
            created_at: None,
            instance_count: instances.len() as u32,
            monitoring_count: instances.iter().filter(|i| i.is_monitoring).count() as u32,
        })
    }
}

#[async_trait]
impl InstanceApi for MockBackendClient {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.record("list_instances", None).await?;
        Ok(self.instances.lock().await.clone())
    }

    async fn register_instance(&self, instance: &NewInstance) -> Result<RegisterInstanceResponse> {
        self.record("register_instance", Some(&instance.instance_id))
            .await?;
        let created = Instance {
            instance_id: instance.instance_id.clone(),
            instance_type: instance.instance_type.clone(),
            region: instance.region.clone(),
            is_monitoring: false,
            is_mock: instance.is_mock.unwrap_or(false),
            created_at: None,
        };
        self.instances.lock().await.push(created.clone());
        Ok(RegisterInstanceResponse {
            message: "Instance registered".to_string(),
            instance: created,
        })
    }

    async fn start_monitoring(&self, instance_id: &str) -> Result<String> {
        self.record("start_monitoring", Some(instance_id)).await?;
        Ok("Monitoring started".to_string())
    }

    async fn stop_monitoring(&self, instance_id: &str) -> Result<String> {
        self.record("stop_monitoring", Some(instance_id)).await?;
        Ok("Monitoring stopped".to_string())
    }

    async fn delete_instance(&self, instance_id: &str) -> Result<String> {
        self.record("delete_instance", Some(instance_id)).await?;
        self.instances
            .lock()
            .await
            .retain(|i| i.instance_id != instance_id);
        Ok("Instance deleted".to_string())
    }
}

#[async_trait]
impl MetricsApi for MockBackendClient {
    async fn get_metrics(&self, instance_id: &str, limit: usize) -> Result<Vec<MetricSample>> {
        // Snapshot before the delay so a late response carries the data that
        // was current when the request was issued
        let snapshot: Vec<MetricSample> =
            self.metrics.lock().await.iter().take(limit).cloned().collect();
        let delay = self.metrics_delays.lock().await.pop_front();
        self.record("get_metrics", Some(instance_id)).await?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn get_decisions(
        &self,
        instance_id: &str,
        query: DecisionQuery,
    ) -> Result<DecisionsResponse> {
        self.record("get_decisions", Some(instance_id)).await?;
        let decisions = self.decisions.lock().await.clone();
        let decisions = match query {
            DecisionQuery::Limit(n) => decisions.into_iter().take(n).collect(),
            DecisionQuery::Page { page, page_size } => decisions
                .into_iter()
                .skip(page.saturating_sub(1) * page_size)
                .take(page_size)
                .collect(),
        };
        Ok(DecisionsResponse {
            instance_id: instance_id.to_string(),
            decisions,
            pagination: None,
        })
    }

    async fn simulate(&self, request: &SimulateRequest) -> Result<SimulateResponse> {
        self.record("simulate", Some(&request.instance_id)).await?;
        Ok(SimulateResponse {
            message: "Simulation complete".to_string(),
            details: serde_json::Map::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn instance(id: &str, monitoring: bool) -> Instance {
        Instance {
            instance_id: id.to_string(),
            instance_type: Some("t3.micro".to_string()),
            region: "us-east-1".to_string(),
            is_monitoring: monitoring,
            is_mock: true,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_returns_configured_instances() {
        let mock = MockBackendClient::new()
            .with_instances(vec![instance("i-1", true), instance("i-2", false)])
            .await;

        let instances = mock.list_instances().await.unwrap();
        assert_eq!(instances.len(), 2);

        let profile = mock.me().await.unwrap();
        assert_eq!(profile.instance_count, 2);
        assert_eq!(profile.monitoring_count, 1);
    }

    #[tokio::test]
    async fn test_mock_login_returns_configured_token() {
        let mock = MockBackendClient::new().with_token("x.y.z").await;
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "Secret1!".to_string(),
        };

        let response = mock.login(&credentials).await.unwrap();

        assert_eq!(response.token, "x.y.z");
        assert_eq!(mock.call_counts().await.login, 1);
    }

    #[tokio::test]
    async fn test_mock_one_shot_error_is_consumed() {
        let mock = MockBackendClient::new()
            .with_error(ApiError::Failed {
                message: "Failed to fetch instances.".to_string(),
                status: None,
            })
            .await;

        assert!(matches!(
            mock.list_instances().await,
            Err(Error::Api(ApiError::Failed { .. }))
        ));
        assert!(mock.list_instances().await.is_ok());
        assert_eq!(mock.call_counts().await.list_instances, 2);
    }

    #[tokio::test]
    async fn test_mock_register_then_delete() {
        let mock = MockBackendClient::new();
        mock.register_instance(&NewInstance {
            instance_id: "i-9".to_string(),
            region: "us-west-2".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(mock.list_instances().await.unwrap().len(), 1);

        mock.delete_instance("i-9").await.unwrap();
        assert!(mock.list_instances().await.unwrap().is_empty());

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].method, "register_instance");
        assert_eq!(captured[0].instance_id.as_deref(), Some("i-9"));
    }
}
