use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::{TokenProvider, TokenRepository};
use crate::auth::application::services::hash_token;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl LogoutRequest {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self {
            refresh_token: refresh_token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

/// Logout never fails from the caller's point of view; revocation problems
/// are logged.
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> LogoutResponse;
}

#[derive(Clone)]
pub struct LogoutUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    token_repository: R,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<R> LogoutUseCase<R>
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
impl<R> ILogoutUseCase for LogoutUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    async fn execute(&self, request: LogoutRequest) -> LogoutResponse {
        if let Some(refresh_token) = request.refresh_token() {
            match self.token_provider.verify_token(refresh_token) {
                Ok(claims) if claims.token_type == "refresh" => {
                    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
                        .unwrap_or_else(|| {
                            Utc::now()
                                + chrono::Duration::seconds(
                                    self.token_provider.refresh_token_expiry_secs(),
                                )
                        });

                    match self
                        .token_repository
                        .blacklist_token(hash_token(refresh_token), claims.sub, expires_at)
                        .await
                    {
                        Ok(()) => info!(user_id = %claims.sub, "Refresh token revoked"),
                        Err(e) => error!(user_id = %claims.sub, "Failed to revoke refresh token: {}", e),
                    }
                }
                Ok(claims) => {
                    warn!(token_type = %claims.token_type, "Logout called with a non-refresh token")
                }
                Err(e) => warn!("Failed to verify token during logout: {}", e),
            }
        }

        LogoutResponse {
            message: "Logged out successfully".to_string(),
        }
    }
}
