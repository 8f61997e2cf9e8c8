pub mod auth_token_store;
pub mod password_hasher;
pub mod token_provider;
pub mod token_repository;
pub mod user_query;
pub mod user_repository;

pub use auth_token_store::{AuthTokenStore, AuthTokenStoreError, NewAuthToken};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
pub use token_repository::{TokenRepository, TokenRepositoryError};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{CreateUserData, ProfileChanges, UserRepository, UserRepositoryError};
