use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::AuthTokenPurpose;
use crate::auth::application::ports::outgoing::{AuthTokenStore, AuthTokenStoreError, NewAuthToken};

const RAW_TOKEN_BYTES: usize = 32;

/// Lifetime of emailed tokens and where their links point.
#[derive(Debug, Clone)]
pub struct AuthTokenConfig {
    pub ttl: Duration,
    pub frontend_url: String,
}

impl AuthTokenConfig {
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Reads `AUTH_TOKEN_TTL_HOURS` and `FRONTEND_URL`.
    pub fn from_env() -> Self {
        let hours = std::env::var("AUTH_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(Self::DEFAULT_TTL_HOURS);

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            ttl: Duration::hours(hours),
            frontend_url,
        }
    }
}

/// SHA-256 hex digest; the only form in which tokens are persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 32 random bytes, hex encoded so the token is safe in a URL.
pub fn generate_raw_token() -> String {
    let mut bytes = [0u8; RAW_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Issues and redeems single-use tokens for email verification and
/// password reset.
#[derive(Clone)]
pub struct AuthTokenService {
    store: Arc<dyn AuthTokenStore + Send + Sync>,
    ttl: Duration,
}

impl AuthTokenService {
    pub fn new(store: Arc<dyn AuthTokenStore + Send + Sync>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Persists the hash and hands back the raw token for the email link.
    pub async fn issue(
        &self,
        user_id: Uuid,
        purpose: AuthTokenPurpose,
    ) -> Result<String, AuthTokenStoreError> {
        let raw = generate_raw_token();
        self.store
            .save(NewAuthToken {
                user_id,
                purpose,
                token_hash: hash_token(&raw),
                expires_at: Utc::now() + self.ttl,
            })
            .await?;

        tracing::debug!(user_id = %user_id, purpose = purpose.as_str(), "Auth token issued");
        Ok(raw)
    }

    pub async fn consume(
        &self,
        raw: &str,
        purpose: AuthTokenPurpose,
    ) -> Result<Option<Uuid>, AuthTokenStoreError> {
        self.store
            .consume(&hash_token(raw.trim()), purpose, Utc::now())
            .await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::InMemoryAuthTokenStore;
    use super::*;

    #[test]
    fn test_hash_token_is_sha256_hex() {
        let hash = hash_token("any_token");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("any_token"));
        assert_ne!(hash, hash_token("other_token"));
    }

    #[test]
    fn test_raw_tokens_are_url_safe_and_unique() {
        let a = generate_raw_token();
        let b = generate_raw_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_issue_stores_only_hash() {
        let store = InMemoryAuthTokenStore::default();
        let service = AuthTokenService::new(Arc::new(store.clone()), Duration::hours(24));
        let user_id = Uuid::new_v4();

        let raw = service
            .issue(user_id, AuthTokenPurpose::PasswordReset)
            .await
            .unwrap();

        let tokens = store.tokens.lock().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token.token_hash, hash_token(&raw));
        assert_ne!(tokens[0].token.token_hash, raw);
        assert!(tokens[0].token.expires_at > Utc::now() + Duration::hours(23));
    }

    #[tokio::test]
    async fn test_consume_is_single_use_and_purpose_bound() {
        let store = InMemoryAuthTokenStore::default();
        let service = AuthTokenService::new(Arc::new(store), Duration::hours(24));
        let user_id = Uuid::new_v4();

        let raw = service
            .issue(user_id, AuthTokenPurpose::EmailVerification)
            .await
            .unwrap();

        assert_eq!(
            service
                .consume(&raw, AuthTokenPurpose::PasswordReset)
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            service
                .consume(&raw, AuthTokenPurpose::EmailVerification)
                .await
                .unwrap(),
            Some(user_id)
        );
        assert_eq!(
            service
                .consume(&raw, AuthTokenPurpose::EmailVerification)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_expired_token_not_consumed() {
        let store = InMemoryAuthTokenStore::default();
        let service = AuthTokenService::new(Arc::new(store), Duration::seconds(-1));

        let raw = service
            .issue(Uuid::new_v4(), AuthTokenPurpose::PasswordReset)
            .await
            .unwrap();

        assert_eq!(
            service
                .consume(&raw, AuthTokenPurpose::PasswordReset)
                .await
                .unwrap(),
            None
        );
    }
}
