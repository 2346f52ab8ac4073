//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Login, registration and the current user
//! - [`InstanceApi`] - Instance registration and monitoring toggles
//! - [`MetricsApi`] - Metric samples, scaling decisions and simulation
//!
//! Every method reports failures as [`ApiError::Failed`](crate::error::ApiError::Failed)
//! with a message ready to show to the user.

mod auth;
mod instances;
mod metrics;

pub use auth::AuthApi;
pub use instances::InstanceApi;
pub use metrics::MetricsApi;
