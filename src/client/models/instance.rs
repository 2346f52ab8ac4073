//! Instance models

use serde::{Deserialize, Serialize};

/// A compute instance registered for monitoring
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Cloud provider identifier (e.g. `i-0abc123`)
    pub instance_id: String,

    /// Declared instance type (e.g. `t3.micro`)
    #[serde(default)]
    pub instance_type: Option<String>,

    pub region: String,

    /// Whether the backend is collecting metrics for this instance
    #[serde(default, alias = "monitoring_enabled")]
    pub is_monitoring: bool,

    /// Simulated instance without a real cloud counterpart
    #[serde(default)]
    pub is_mock: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response to `GET /api/instances/`
#[derive(Debug, Clone, Deserialize)]
pub struct InstancesResponse {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// Body of `POST /api/instances/`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NewInstance {
    pub instance_id: String,

    pub region: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mock: Option<bool>,
}

/// Response to `POST /api/instances/`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInstanceResponse {
    #[serde(default)]
    pub message: String,

    pub instance: Instance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_accepts_monitoring_alias() {
        let json = r#"{
            "instance_id": "i-1",
            "region": "us-east-1",
            "monitoring_enabled": true
        }"#;
        let instance: Instance = serde_json::from_str(json).unwrap();
        assert!(instance.is_monitoring);
        assert!(!instance.is_mock);
        assert!(instance.instance_type.is_none());
    }

    #[test]
    fn test_new_instance_omits_unset_optionals() {
        let body = NewInstance {
            instance_id: "i-1".to_string(),
            region: "eu-west-1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"instance_id": "i-1", "region": "eu-west-1"})
        );
    }
}
