//! Metric and scaling-decision models

use serde::{Deserialize, Serialize};

/// One metric sample collected by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    /// Backend timestamp (ISO 8601)
    pub timestamp: String,

    /// CPU utilization in percent
    #[serde(default)]
    pub cpu_utilization: Option<f64>,

    /// Memory usage in percent
    #[serde(default)]
    pub memory_usage: Option<f64>,

    #[serde(default)]
    pub network_in: Option<f64>,

    #[serde(default)]
    pub network_out: Option<f64>,
}

/// Response to `GET /api/metrics/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsResponse {
    pub instance_id: String,

    #[serde(default)]
    pub metrics: Vec<MetricSample>,
}

/// A scaling recommendation produced by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalingDecision {
    pub timestamp: String,

    /// Decision kind (e.g. `scale_up`, `scale_down`, `no_action`)
    #[serde(alias = "action")]
    pub decision: String,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub current_instance_type: Option<String>,

    #[serde(default)]
    pub recommended_instance_type: Option<String>,

    /// Confidence in `0.0..=1.0`
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Page metadata returned by the paginated decisions endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub page: usize,

    pub page_size: usize,

    #[serde(default, alias = "total_count")]
    pub total: usize,

    #[serde(default)]
    pub total_pages: usize,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Response to `GET /api/metrics/decisions/{id}`
///
/// `pagination` is only present when the request was paginated.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionsResponse {
    pub instance_id: String,

    #[serde(default)]
    pub decisions: Vec<ScalingDecision>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// How to ask for scaling decisions.
///
/// The backend answers two request shapes: a plain `limit`, or `page` +
/// `page_size` with pagination metadata in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionQuery {
    /// Most recent `n` decisions
    Limit(usize),
    /// 1-indexed page of `page_size` decisions
    Page { page: usize, page_size: usize },
}

impl DecisionQuery {
    /// Convert to query string parameters
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        match *self {
            DecisionQuery::Limit(limit) => vec![("limit", limit.to_string())],
            DecisionQuery::Page { page, page_size } => vec![
                ("page", page.to_string()),
                ("page_size", page_size.to_string()),
            ],
        }
    }
}

/// Body of `POST /api/metrics/simulate`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SimulateRequest {
    pub instance_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_utilization: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
}

/// Response to `POST /api/metrics/simulate`
///
/// Everything besides `message` is backend-defined and kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    #[serde(default)]
    pub message: String,

    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
