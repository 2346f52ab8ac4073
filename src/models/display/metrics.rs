//! Metric sample and scaling decision display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{MetricSample, ScalingDecision};
use crate::output::formatters::{
    format_number, format_percent, format_timestamp_local, truncate_string,
};

/// Maximum reason length shown in tables
const REASON_WIDTH: usize = 48;

/// Metric sample display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MetricDisplay {
    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "CPU")]
    pub cpu: String,

    #[tabled(rename = "MEMORY")]
    pub memory: String,

    #[tabled(rename = "NET IN")]
    pub network_in: String,

    #[tabled(rename = "NET OUT")]
    pub network_out: String,
}

impl From<MetricSample> for MetricDisplay {
    fn from(sample: MetricSample) -> Self {
        Self {
            time: format_timestamp_local(&sample.timestamp),
            cpu: format_percent(sample.cpu_utilization),
            memory: format_percent(sample.memory_usage),
            network_in: format_number(sample.network_in),
            network_out: format_number(sample.network_out),
        }
    }
}

/// Scaling decision display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DecisionDisplay {
    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "DECISION")]
    pub decision: String,

    /// Current -> recommended instance type
    #[tabled(rename = "TYPE CHANGE")]
    pub type_change: String,

    #[tabled(rename = "CONFIDENCE")]
    pub confidence: String,

    #[tabled(rename = "REASON")]
    pub reason: String,
}

impl From<ScalingDecision> for DecisionDisplay {
    fn from(decision: ScalingDecision) -> Self {
        let type_change = match (
            decision.current_instance_type,
            decision.recommended_instance_type,
        ) {
            (Some(current), Some(recommended)) if current != recommended => {
                format!("{} -> {}", current, recommended)
            }
            (Some(current), _) => current,
            (None, Some(recommended)) => format!("-> {}", recommended),
            (None, None) => "--".to_string(),
        };

        Self {
            time: format_timestamp_local(&decision.timestamp),
            decision: decision.decision,
            type_change,
            confidence: format_percent(decision.confidence.map(|c| c * 100.0)),
            reason: decision
                .reason
                .map(|r| truncate_string(&r, REASON_WIDTH))
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}
