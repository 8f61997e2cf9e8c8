use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::{
    TokenError, TokenProvider, TokenRepository, TokenRepositoryError,
};
use crate::auth::application::services::hash_token;

/// A non-blank refresh token, trimmed.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawRefreshTokenRequest")]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

#[derive(Deserialize)]
struct RawRefreshTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenRequestError {
    #[error("Refresh token cannot be empty")]
    EmptyToken,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, RefreshTokenRequestError> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(RefreshTokenRequestError::EmptyToken);
        }
        Ok(Self {
            refresh_token: refresh_token.to_string(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl TryFrom<RawRefreshTokenRequest> for RefreshTokenRequest {
    type Error = RefreshTokenRequestError;

    fn try_from(raw: RawRefreshTokenRequest) -> Result<Self, Self::Error> {
        Self::new(raw.refresh_token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Refresh token has expired")]
    TokenExpired,

    #[error("Invalid refresh token")]
    TokenInvalid,

    #[error("Refresh token has been revoked")]
    TokenRevoked,

    #[error("Only refresh tokens can be exchanged")]
    InvalidTokenType,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Revocation list unavailable: {0}")]
    RepositoryError(String),
}

impl From<TokenError> for RefreshTokenError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::TokenExpired => Self::TokenExpired,
            TokenError::InvalidTokenType(_) => Self::InvalidTokenType,
            TokenError::TokenNotYetValid | TokenError::InvalidSignature | TokenError::MalformedToken => {
                Self::TokenInvalid
            }
            TokenError::EncodingError(msg) => Self::TokenGenerationFailed(msg),
        }
    }
}

impl From<TokenRepositoryError> for RefreshTokenError {
    fn from(error: TokenRepositoryError) -> Self {
        Self::RepositoryError(error.to_string())
    }
}

/// Only a new access token; the refresh token keeps its original expiry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

#[derive(Clone)]
pub struct RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    token_repository: R,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    pub fn new(token_repository: R, token_provider: Arc<dyn TokenProvider + Send + Sync>) -> Self {
        Self {
            token_repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<R> IRefreshTokenUseCase for RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        let token_hash = hash_token(request.refresh_token());
        if self
            .token_repository
            .is_token_blacklisted(&token_hash)
            .await?
        {
            tracing::warn!("Attempt to refresh with a revoked token");
            return Err(RefreshTokenError::TokenRevoked);
        }

        let access_token = self
            .token_provider
            .refresh_access_token(request.refresh_token())?;

        Ok(RefreshTokenResponse { access_token })
    }
}
