//! Instance API trait

use async_trait::async_trait;

use crate::client::models::{Instance, NewInstance, RegisterInstanceResponse};
use crate::error::Result;

/// Instance management operations
#[async_trait]
pub trait InstanceApi: Send + Sync {
    /// List instances registered by the current user
    async fn list_instances(&self) -> Result<Vec<Instance>>;

    /// Register an instance for monitoring
    async fn register_instance(&self, instance: &NewInstance) -> Result<RegisterInstanceResponse>;

    /// Start collecting metrics for an instance. Returns the backend message.
    async fn start_monitoring(&self, instance_id: &str) -> Result<String>;

    /// Stop collecting metrics for an instance. Returns the backend message.
    async fn stop_monitoring(&self, instance_id: &str) -> Result<String>;

    /// Remove an instance. Returns the backend message.
    async fn delete_instance(&self, instance_id: &str) -> Result<String>;
}
