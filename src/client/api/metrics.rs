//! Metrics API trait

use async_trait::async_trait;

use crate::client::models::{
    DecisionQuery, DecisionsResponse, MetricSample, SimulateRequest, SimulateResponse,
};
use crate::error::Result;

/// Metric and scaling-decision operations
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// Most recent `limit` metric samples for an instance
    async fn get_metrics(&self, instance_id: &str, limit: usize) -> Result<Vec<MetricSample>>;

    /// Scaling decisions for an instance, limited or paginated
    async fn get_decisions(
        &self,
        instance_id: &str,
        query: DecisionQuery,
    ) -> Result<DecisionsResponse>;

    /// Ask the backend to generate synthetic metrics
    async fn simulate(&self, request: &SimulateRequest) -> Result<SimulateResponse>;
}
