//! Authentication models

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Email/password pair sent to login and register
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response to `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,

    /// Bearer token for subsequent requests
    pub token: String,

    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Response to `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,

    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Current user, from `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,

    pub email: String,

    #[serde(default)]
    pub created_at: Option<String>,

    /// Instances registered by this user
    #[serde(default)]
    pub instance_count: u32,

    /// Instances with monitoring enabled
    #[serde(default)]
    pub monitoring_count: u32,
}
