//! Scaling monitor backend client
//!
//! [`HttpClient`] is the single gateway to the backend (token attachment and
//! the global 401 handling). [`BackendClient`] layers the typed API traits on
//! top of it.

pub mod api;
pub mod backend;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, InstanceApi, MetricsApi};
pub use backend::BackendClient;
pub use http::HttpClient;
#[cfg(test)]
pub use mock::MockBackendClient;
