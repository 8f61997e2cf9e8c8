use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::{
    domain::entities::{User, UserId, UserRole},
    ports::outgoing::{UserQuery, UserQueryError},
};

/// The caller's own profile, preferences already merged over defaults.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    #[schema(value_type = Object)]
    pub preferences: Map<String, Value>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            preferences: user.preferences.as_map().clone(),
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FetchUserError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchUserError>;
}

#[derive(Clone)]
pub struct FetchUserProfileService<Q: UserQuery> {
    query: Q,
}

impl<Q: UserQuery> FetchUserProfileService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q: UserQuery> FetchUserProfileUseCase for FetchUserProfileService<Q> {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchUserError> {
        match self.query.find_by_id(user_id.value()).await? {
            Some(user) if !user.is_deleted => Ok(user.into()),
            _ => Err(FetchUserError::UserNotFound(user_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory_users::InMemoryUsers;
    use crate::tests::support::stubs::sample_user;

    #[tokio::test]
    async fn test_fetch_profile_includes_default_preferences() {
        let user = sample_user();
        let service = FetchUserProfileService::new(InMemoryUsers::with(vec![user.clone()]));

        let profile = service.execute(user.id.into()).await.unwrap();

        assert_eq!(profile.email, user.email);
        assert_eq!(profile.preferences["language"], "en");
        assert_eq!(profile.preferences["notifications"], true);
    }

    #[tokio::test]
    async fn test_fetch_profile_hides_deleted_users() {
        let mut user = sample_user();
        user.is_deleted = true;
        let service = FetchUserProfileService::new(InMemoryUsers::with(vec![user.clone()]));

        assert!(matches!(
            service.execute(user.id.into()).await,
            Err(FetchUserError::UserNotFound(_))
        ));
    }
}
