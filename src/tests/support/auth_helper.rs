use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::TokenProvider;

pub const TEST_JWT_SECRET: &str = "FAKE_JWT_SECRET_DO_NOT_USE_0123456789";

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        issuer: "wellness-test".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    }))
}

/// `Authorization` header carrying a fresh access token.
pub fn bearer(user_id: Uuid, verified: bool, role: UserRole) -> (&'static str, String) {
    let token = test_token_provider()
        .generate_access_token(user_id, verified, role)
        .expect("test token");
    ("Authorization", format!("Bearer {}", token))
}
