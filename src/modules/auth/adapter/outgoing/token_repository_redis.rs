use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::{TokenRepository, TokenRepositoryError};

/// Redis-backed blacklist of revoked refresh tokens.
///
/// ```text
/// auth:blacklist:token:{token_hash} -> "{user_id}"   (TTL = token lifetime left)
/// ```
///
/// The key's existence means the token is revoked. Redis expiry is the only
/// cleanup mechanism.
#[derive(Clone)]
pub struct RedisTokenRepository {
    pool: Arc<Pool>,
}

impl RedisTokenRepository {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn token_key(token_hash: &str) -> String {
        format!("{REVOKED_PREFIX}{token_hash}")
    }

    async fn conn(&self) -> Result<deadpool_redis::Connection, TokenRepositoryError> {
        self.pool.get().await.map_err(store_error)
    }
}

const REVOKED_PREFIX: &str = "auth:blacklist:token:";

fn store_error(e: impl std::fmt::Display) -> TokenRepositoryError {
    TokenRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(TokenRepositoryError::AlreadyExpired);
        }

        self.conn()
            .await?
            .set_ex::<_, _, ()>(Self::token_key(&token_hash), user_id.to_string(), ttl as u64)
            .await
            .map_err(store_error)?;

        tracing::debug!(%user_id, ttl, "Refresh token revoked");
        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        self.conn()
            .await?
            .exists(Self::token_key(token_hash))
            .await
            .map_err(store_error)
    }
}
