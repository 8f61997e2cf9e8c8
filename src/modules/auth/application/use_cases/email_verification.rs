use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::AuthTokenPurpose;
use crate::auth::application::ports::outgoing::{
    AuthTokenStoreError, UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::{spawn_email_with_retry, AuthTokenService};
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmailVerificationRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailVerificationError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] UserRepositoryError),

    #[error("Token store error: {0}")]
    TokenStoreError(#[from] AuthTokenStoreError),
}

/// Sends a fresh verification link. Unknown, deleted and already verified
/// addresses succeed silently.
#[async_trait]
pub trait IRequestEmailVerificationUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), EmailVerificationError>;
}

#[derive(Clone)]
pub struct RequestEmailVerificationUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    tokens: AuthTokenService,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl<Q> RequestEmailVerificationUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        tokens: AuthTokenService,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            query,
            tokens,
            notifier,
        }
    }
}

#[async_trait]
impl<Q> IRequestEmailVerificationUseCase for RequestEmailVerificationUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, email: &str) -> Result<(), EmailVerificationError> {
        let email = email.trim().to_lowercase();
        let user = match self.query.find_by_email(&email).await? {
            Some(user) if !user.is_deleted && !user.is_verified => user,
            _ => {
                tracing::debug!("Verification requested for unknown or verified address");
                return Ok(());
            }
        };

        let token = self
            .tokens
            .issue(user.id, AuthTokenPurpose::EmailVerification)
            .await?;

        let notifier = self.notifier.clone();
        let recipient = EmailRecipient {
            email: user.email,
            full_name: user.full_name,
        };
        spawn_email_with_retry(user.id, "email_verification", move || {
            let notifier = notifier.clone();
            let recipient = recipient.clone();
            let token = token.clone();
            async move { notifier.send_verification_email(&recipient, &token).await }
        });

        Ok(())
    }
}

#[async_trait]
pub trait IConfirmEmailVerificationUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<Uuid, EmailVerificationError>;
}

#[derive(Clone)]
pub struct ConfirmEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    tokens: AuthTokenService,
}

impl<R> ConfirmEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, tokens: AuthTokenService) -> Self {
        Self { repository, tokens }
    }
}

#[async_trait]
impl<R> IConfirmEmailVerificationUseCase for ConfirmEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    async fn execute(&self, token: &str) -> Result<Uuid, EmailVerificationError> {
        if token.trim().is_empty() {
            return Err(EmailVerificationError::InvalidToken);
        }

        let user_id = self
            .tokens
            .consume(token, AuthTokenPurpose::EmailVerification)
            .await?
            .ok_or(EmailVerificationError::InvalidToken)?;

        self.repository.activate_user(user_id).await?;
        tracing::info!(user_id = %user_id, "Email verified");
        Ok(user_id)
    }
}
