//! User profile display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::UserProfile;
use crate::output::formatters::format_timestamp_local;

/// Profile display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProfileDisplay {
    #[tabled(rename = "USER ID")]
    pub user_id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// Registered instances
    #[tabled(rename = "INSTANCES")]
    pub instances: u32,

    /// Instances being monitored
    #[tabled(rename = "MONITORING")]
    pub monitoring: u32,

    #[tabled(rename = "MEMBER SINCE")]
    pub created: String,
}

impl From<UserProfile> for ProfileDisplay {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            email: profile.email,
            instances: profile.instance_count,
            monitoring: profile.monitoring_count,
            created: profile
                .created_at
                .as_deref()
                .map(format_timestamp_local)
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}
