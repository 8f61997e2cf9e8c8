use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::AuthTokenPurpose;
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    AuthTokenStoreError, PasswordHasher, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};
use crate::auth::application::services::{spawn_email_with_retry, AuthTokenService};
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordResetError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] UserRepositoryError),

    #[error("Token store error: {0}")]
    TokenStoreError(#[from] AuthTokenStoreError),
}

/// Always answers the same way so callers cannot tell which emails exist.
#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), PasswordResetError>;
}

#[derive(Clone)]
pub struct RequestPasswordResetUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    tokens: AuthTokenService,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl<Q> RequestPasswordResetUseCase<Q>
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
impl<Q> IRequestPasswordResetUseCase for RequestPasswordResetUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, email: &str) -> Result<(), PasswordResetError> {
        let email = email.trim().to_lowercase();
        let user = match self.query.find_by_email(&email).await? {
            Some(user) if !user.is_deleted => user,
            _ => return Ok(()),
        };

        let token = self
            .tokens
            .issue(user.id, AuthTokenPurpose::PasswordReset)
            .await?;

        let notifier = self.notifier.clone();
        let recipient = EmailRecipient {
            email: user.email,
            full_name: user.full_name,
        };
        spawn_email_with_retry(user.id, "password_reset", move || {
            let notifier = notifier.clone();
            let recipient = recipient.clone();
            let token = token.clone();
            async move { notifier.send_password_reset_email(&recipient, &token).await }
        });

        Ok(())
    }
}

#[async_trait]
pub trait IConfirmPasswordResetUseCase: Send + Sync {
    async fn execute(&self, token: &str, new_password: &str) -> Result<(), PasswordResetError>;
}

#[derive(Clone)]
pub struct ConfirmPasswordResetUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    tokens: AuthTokenService,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    password_policy: Arc<dyn PasswordPolicy + Send + Sync>,
}

impl<R> ConfirmPasswordResetUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repository: R,
        tokens: AuthTokenService,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        password_policy: Arc<dyn PasswordPolicy + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            tokens,
            password_hasher,
            password_policy,
        }
    }
}

#[async_trait]
impl<R> IConfirmPasswordResetUseCase for ConfirmPasswordResetUseCase<R>
where
    R: UserRepository,
{
    async fn execute(&self, token: &str, new_password: &str) -> Result<(), PasswordResetError> {
        // Validate before consuming so a weak password doesn't burn the token.
        self.password_policy
            .validate(new_password)
            .map_err(|e| PasswordResetError::InvalidPassword(e.to_string()))?;

        if token.trim().is_empty() {
            return Err(PasswordResetError::InvalidToken);
        }

        let user_id = self
            .tokens
            .consume(token, AuthTokenPurpose::PasswordReset)
            .await?
            .ok_or(PasswordResetError::InvalidToken)?;

        let hash = self
            .password_hasher
            .hash_password(new_password)
            .await
            .map_err(|e| PasswordResetError::HashingFailed(e.to_string()))?;

        self.repository.update_password(user_id, hash).await?;
        tracing::info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }
}
