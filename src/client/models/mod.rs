//! Backend data models
//!
//! Request and response shapes for the scaling monitor REST API, organized by
//! resource.

mod auth;
mod instance;
mod metrics;

pub use auth::{Credentials, LoginResponse, RegisterResponse, UserProfile};
pub use instance::{Instance, InstancesResponse, NewInstance, RegisterInstanceResponse};
pub use metrics::{
    DecisionQuery, DecisionsResponse, MetricSample, MetricsResponse, ScalingDecision,
    SimulateRequest, SimulateResponse,
};

use serde::{Deserialize, Deserializer};

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, Default, serde::Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Accept an identifier sent either as a JSON string or a JSON number
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}
