use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::create_user::{validate_full_name, CreateUserError};
use super::fetch_profile::UserProfile;
use crate::auth::application::{
    domain::entities::UserId,
    ports::incoming::password_policy::PasswordPolicy,
    ports::outgoing::{
        PasswordHasher, ProfileChanges, UserQuery, UserQueryError, UserRepository,
        UserRepositoryError,
    },
};

const PHONE_MAX: usize = 20;

/// Body of `PATCH /api/users/me`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Map<String, Value>>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UpdateUserInput {
    pub user_id: UserId,
    pub changes: UpdateProfileRequest,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum UpdateUserError {
    #[error("Invalid full name: {0}")]
    InvalidFullName(String),

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Current password is required to set a new one")]
    CurrentPasswordRequired,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] UserRepositoryError),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait UpdateUserProfileUseCase: Send + Sync {
    async fn execute(&self, data: UpdateUserInput) -> Result<UserProfile, UpdateUserError>;
}

#[derive(Clone)]
pub struct UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    password_policy: Arc<dyn PasswordPolicy + Send + Sync>,
}

impl<Q, R> UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        password_policy: Arc<dyn PasswordPolicy + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            password_policy,
        }
    }
}

fn validate_phone(phone: &str) -> Result<String, UpdateUserError> {
    let phone = phone.trim();
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !allowed || digits < 6 || phone.len() > PHONE_MAX {
        return Err(UpdateUserError::InvalidPhone);
    }
    Ok(phone.to_string())
}

#[async_trait]
impl<Q, R> UpdateUserProfileUseCase for UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, data: UpdateUserInput) -> Result<UserProfile, UpdateUserError> {
        let user = match self.query.find_by_id(data.user_id.value()).await? {
            Some(user) if !user.is_deleted => user,
            _ => return Err(UpdateUserError::UserNotFound),
        };
        let request = data.changes;
        let mut changes = ProfileChanges::default();

        if let Some(full_name) = request.full_name.as_deref() {
            changes.full_name = Some(
                validate_full_name(full_name).map_err(|e| match e {
                    CreateUserError::InvalidFullName(msg) => UpdateUserError::InvalidFullName(msg),
                    other => UpdateUserError::InvalidFullName(other.to_string()),
                })?,
            );
        }

        if let Some(phone) = request.phone.as_deref() {
            changes.phone = Some(validate_phone(phone)?);
        }

        if let Some(update) = request.preferences.as_ref() {
            let mut preferences = user.preferences.clone();
            preferences.merge(update);
            changes.preferences = Some(preferences.to_value());
        }

        if let Some(new_password) = request.new_password.as_deref() {
            let current = request
                .current_password
                .as_deref()
                .ok_or(UpdateUserError::CurrentPasswordRequired)?;

            let matches = self
                .password_hasher
                .verify_password(current, &user.password_hash)
                .await
                .map_err(|e| UpdateUserError::HashingFailed(e.to_string()))?;
            if !matches {
                tracing::warn!(user_id = %user.id, "Profile password change with wrong current password");
                return Err(UpdateUserError::IncorrectPassword);
            }

            self.password_policy
                .validate(new_password)
                .map_err(|e| UpdateUserError::InvalidPassword(e.to_string()))?;

            changes.password_hash = Some(
                self.password_hasher
                    .hash_password(new_password)
                    .await
                    .map_err(|e| UpdateUserError::HashingFailed(e.to_string()))?,
            );
        }

        if changes == ProfileChanges::default() {
            return Ok(user.into());
        }

        let updated = self.repository.update_profile(user.id, changes).await?;
        tracing::info!(user_id = %updated.id, "Profile updated");
        Ok(updated.into())
    }
}
