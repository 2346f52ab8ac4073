//! Instance display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Instance;
use crate::output::formatters::format_timestamp_local;

/// Instance display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct InstanceDisplay {
    /// Instance ID
    #[tabled(rename = "INSTANCE ID")]
    pub instance_id: String,

    /// Declared instance type
    #[tabled(rename = "TYPE")]
    pub instance_type: String,

    #[tabled(rename = "REGION")]
    pub region: String,

    /// Monitoring state
    #[tabled(rename = "MONITORING")]
    pub monitoring: String,

    /// Whether this is a simulated instance
    #[tabled(rename = "MOCK")]
    pub mock: String,

    /// Registration time
    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<Instance> for InstanceDisplay {
    fn from(instance: Instance) -> Self {
        Self {
            instance_id: instance.instance_id,
            instance_type: instance.instance_type.unwrap_or_else(|| "--".to_string()),
            region: instance.region,
            monitoring: if instance.is_monitoring {
                "active".to_string()
            } else {
                "stopped".to_string()
            },
            mock: if instance.is_mock { "yes" } else { "no" }.to_string(),
            created: instance
                .created_at
                .as_deref()
                .map(format_timestamp_local)
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}
