use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenError, TokenProvider, UserQuery, UserQueryError,
};

/// Validated login request; deserializing it runs the validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Credentials")]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

impl TryFrom<Credentials> for LoginRequest {
    type Error = LoginRequestError;

    fn try_from(raw: Credentials) -> Result<Self, Self::Error> {
        Self::new(raw.email, raw.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User account has been deleted")]
    UserDeleted,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

/// Public profile returned next to a fresh token pair.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginUserResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        if user.is_deleted {
            return Err(LoginError::UserDeleted);
        }

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        let issue = |token: Result<String, TokenError>| {
            token.map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))
        };
        let provider = &self.token_provider;
        let access_token =
            issue(provider.generate_access_token(user.id, user.is_verified, user.role))?;
        let refresh_token =
            issue(provider.generate_refresh_token(user.id, user.is_verified, user.role))?;

        Ok(LoginUserResponse {
            access_token,
            refresh_token,
            user: UserInfo {
                id: user.id,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                role: user.role,
                is_verified: user.is_verified,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::User;
    use crate::auth::application::ports::outgoing::HashError;
    use crate::tests::support::auth_helper::test_token_provider;
    use crate::tests::support::stubs::sample_user;
    use uuid::Uuid;

    struct FixedQuery(Option<User>);

    #[async_trait]
    impl UserQuery for FixedQuery {
        async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, UserQueryError> {
            Ok(self.0.clone())
        }
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
            Ok(self.0.clone().filter(|u| u.email == email))
        }
        async fn find_by_username(&self, _: &str) -> Result<Option<User>, UserQueryError> {
            Ok(None)
        }
    }

    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError> {
            Ok(password.to_string())
        }
        async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            Ok(password == hash)
        }
    }

    fn user() -> User {
        let mut user = sample_user();
        user.email = "client@example.com".to_string();
        user.password_hash = "correct horse battery".to_string();
        user.role = UserRole::Client;
        user
    }

    fn use_case(user: Option<User>) -> LoginUserUseCase<FixedQuery> {
        LoginUserUseCase::new(FixedQuery(user), Arc::new(PlainHasher), test_token_provider())
    }

    #[test]
    fn test_login_request_normalizes_email() {
        let req = LoginRequest::new(" Client@Example.COM ".into(), "pw".into()).unwrap();
        assert_eq!(req.email(), "client@example.com");
        assert_eq!(
            LoginRequest::new("nope".into(), "pw".into()).unwrap_err(),
            LoginRequestError::InvalidEmailFormat
        );
        assert_eq!(
            LoginRequest::new("a@b.co".into(), "".into()).unwrap_err(),
            LoginRequestError::EmptyPassword
        );
    }

    #[tokio::test]
    async fn test_login_success_issues_role_tokens() {
        let req = LoginRequest::new("client@example.com".into(), "correct horse battery".into())
            .unwrap();
        let res = use_case(Some(user())).execute(req).await.unwrap();

        let claims = test_token_provider().verify_token(&res.access_token).unwrap();
        assert_eq!(claims.role, UserRole::Client);
        assert_eq!(claims.token_type, "access");
        assert_eq!(res.user.email, "client@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let req = LoginRequest::new("client@example.com".into(), "wrong".into()).unwrap();
        assert_eq!(
            use_case(Some(user())).execute(req).await.unwrap_err(),
            LoginError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let req = LoginRequest::new("ghost@example.com".into(), "whatever".into()).unwrap();
        assert_eq!(
            use_case(None).execute(req).await.unwrap_err(),
            LoginError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_login_deleted_user() {
        let mut deleted = user();
        deleted.is_deleted = true;
        let req = LoginRequest::new("client@example.com".into(), "correct horse battery".into())
            .unwrap();
        assert_eq!(
            use_case(Some(deleted)).execute(req).await.unwrap_err(),
            LoginError::UserDeleted
        );
    }
}
