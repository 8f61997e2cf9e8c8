use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token type, expected: {0}")]
    InvalidTokenType(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// JWT claims. `token_type` is "access" or "refresh".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String,
    pub is_verified: bool,
    #[serde(default)]
    pub role: UserRole,
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(
        &self,
        user_id: Uuid,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError>;

    fn generate_refresh_token(
        &self,
        user_id: Uuid,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError>;

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Issues a new access token carrying the refresh token's identity.
    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError>;

    fn refresh_token_expiry_secs(&self) -> i64;
}
