pub mod auth_tokens;
pub mod email_dispatch;
pub mod password;

pub use auth_tokens::{generate_raw_token, hash_token, AuthTokenConfig, AuthTokenService};
pub use email_dispatch::spawn_email_with_retry;
