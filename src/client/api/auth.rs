//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{Credentials, LoginResponse, RegisterResponse, UserProfile};
use crate::error::Result;

/// Authentication operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Create a new account
    async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse>;

    /// Fetch the authenticated user's profile
    async fn me(&self) -> Result<UserProfile>;
}
