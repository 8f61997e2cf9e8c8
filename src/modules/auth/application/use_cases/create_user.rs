use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const FULL_NAME_MAX: usize = 100;

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateUserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid full name: {0}")]
    InvalidFullName(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),

    #[error("Repository error: {0}")]
    RepositoryError(UserRepositoryError),
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    password_policy: Arc<dyn PasswordPolicy + Send + Sync>,
}

impl<Q, R> CreateUserUseCase<Q, R>
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

pub fn validate_username(username: &str) -> Result<String, CreateUserError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(CreateUserError::InvalidUsername(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CreateUserError::InvalidUsername(
            "Username may only contain letters, digits and underscores".to_string(),
        ));
    }
    Ok(username.to_string())
}

pub fn normalize_email(email: &str) -> Result<String, CreateUserError> {
    let email = email.trim().to_lowercase();
    if !EmailAddress::is_valid(&email) {
        return Err(CreateUserError::InvalidEmail("Invalid email format".to_string()));
    }
    Ok(email)
}

pub fn validate_full_name(full_name: &str) -> Result<String, CreateUserError> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(CreateUserError::InvalidFullName(
            "Full name is required".to_string(),
        ));
    }
    if full_name.chars().count() > FULL_NAME_MAX {
        return Err(CreateUserError::InvalidFullName(format!(
            "Full name must be at most {} characters",
            FULL_NAME_MAX
        )));
    }
    Ok(full_name.to_string())
}

/// Admin accounts are provisioned out of band, never self-registered.
fn resolve_role(role: Option<&str>) -> Result<UserRole, CreateUserError> {
    let role = match role {
        None => return Ok(UserRole::default()),
        Some(raw) => raw
            .parse::<UserRole>()
            .map_err(|e| CreateUserError::InvalidRole(e.to_string()))?,
    };

    if role == UserRole::Admin {
        return Err(CreateUserError::InvalidRole(
            "Admin role cannot be self-assigned".to_string(),
        ));
    }
    Ok(role)
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        let username = validate_username(&input.username)?;
        let email = normalize_email(&input.email)?;
        let full_name = validate_full_name(&input.full_name)?;
        let role = resolve_role(input.role.as_deref())?;
        self.password_policy
            .validate(&input.password)
            .map_err(|e| CreateUserError::InvalidPassword(e.to_string()))?;

        if self.query.find_by_username(&username).await?.is_some()
            || self.query.find_by_email(&email).await?.is_some()
        {
            return Err(CreateUserError::UserAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let phone = input
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let user = self
            .repository
            .create_user(CreateUserData {
                username,
                email,
                password_hash,
                full_name,
                phone,
                role,
            })
            .await
            .map_err(|e| match e {
                // unique index race between the lookup and the insert
                UserRepositoryError::UserAlreadyExists => CreateUserError::UserAlreadyExists,
                other => CreateUserError::RepositoryError(other),
            })?;

        Ok(CreateUserOutput {
            user_id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        })
    }
}
