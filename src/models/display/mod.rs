//! Display models: one row type per backend model, with column headers for
//! tables and flat fields for JSON.

mod instance;
mod metrics;
mod user;

pub use instance::InstanceDisplay;
pub use metrics::{DecisionDisplay, MetricDisplay};
pub use user::ProfileDisplay;
