use std::env;

const MIN_SECRET_BYTES: usize = 32;
const MAX_ACCESS_EXPIRY_SECS: i64 = 24 * 60 * 60;
const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 30 * 60;
const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtConfigError {
    #[error("JWT_SECRET must be at least {} bytes for HS256", MIN_SECRET_BYTES)]
    ShortSecret,

    #[error("JWT_ACCESS_EXPIRY must be between 1 and {} seconds", MAX_ACCESS_EXPIRY_SECS)]
    AccessExpiry,

    #[error("JWT_REFRESH_EXPIRY must be greater than JWT_ACCESS_EXPIRY")]
    RefreshExpiry,
}

/// Signing key and token lifetimes (seconds).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), JwtConfigError> {
        if self.secret_key.len() < MIN_SECRET_BYTES {
            return Err(JwtConfigError::ShortSecret);
        }
        if !(1..=MAX_ACCESS_EXPIRY_SECS).contains(&self.access_token_expiry) {
            return Err(JwtConfigError::AccessExpiry);
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(JwtConfigError::RefreshExpiry);
        }
        Ok(())
    }

    /// Startup only: panics on missing or invalid settings.
    pub fn from_env() -> Self {
        fn secs(key: &str, default: i64) -> i64 {
            match env::var(key) {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .unwrap_or_else(|_| panic!("{key} must be a whole number of seconds")),
                Err(_) => default,
            }
        }

        let config = Self {
            secret_key: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "wellness-backend".to_string()),
            access_token_expiry: secs("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY_SECS),
            refresh_token_expiry: secs("JWT_REFRESH_EXPIRY", DEFAULT_REFRESH_EXPIRY_SECS),
        };

        if let Err(e) = config.validate() {
            panic!("{e}");
        }
        config
    }
}
