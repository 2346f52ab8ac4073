//! Row types for rendering backend data in tables and JSON

pub mod display;

pub use display::{DecisionDisplay, InstanceDisplay, MetricDisplay, ProfileDisplay};
