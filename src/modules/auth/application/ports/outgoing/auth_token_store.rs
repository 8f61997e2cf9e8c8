use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::AuthTokenPurpose;

/// A single-use emailed token as persisted. Only the hash is ever stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthToken {
    pub user_id: Uuid,
    pub purpose: AuthTokenPurpose,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AuthTokenStore: Send + Sync {
    async fn save(&self, token: NewAuthToken) -> Result<(), AuthTokenStoreError>;

    /// Atomically marks the token consumed if it exists for `purpose`, has not
    /// been consumed and has not expired at `now`. Returns the owning user, or
    /// `None` when nothing matched.
    async fn consume(
        &self,
        token_hash: &str,
        purpose: AuthTokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, AuthTokenStoreError>;
}
