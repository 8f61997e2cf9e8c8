use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

/// Clock skew tolerated on `exp` and `nbf`.
const LEEWAY_SECS: u64 = 30;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Access,
    Refresh,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Access => "access",
            Kind::Refresh => "refresh",
        }
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret_key.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            config,
        }
    }

    fn lifetime(&self, kind: Kind) -> i64 {
        match kind {
            Kind::Access => self.config.access_token_expiry,
            Kind::Refresh => self.config.refresh_token_expiry,
        }
    }

    fn sign(
        &self,
        kind: Kind,
        user_id: Uuid,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        let issued_at = Utc::now();
        let claims = TokenClaims {
            sub: user_id,
            exp: (issued_at + Duration::seconds(self.lifetime(kind))).timestamp(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            token_type: kind.label().to_string(),
            is_verified,
            role,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => {
            tracing::warn!("Rejected token with a bad signature");
            TokenError::InvalidSignature
        }
        _ => TokenError::MalformedToken,
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(
        &self,
        user_id: Uuid,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        self.sign(Kind::Access, user_id, is_verified, role)
    }

    fn generate_refresh_token(
        &self,
        user_id: Uuid,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        self.sign(Kind::Refresh, user_id, is_verified, role)
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.validate_nbf = true;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = classify(&e);
                tracing::debug!(error = %err, "Token verification failed");
                err
            })
    }

    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_token(refresh_token)?;
        if claims.token_type != Kind::Refresh.label() {
            tracing::warn!(token_type = %claims.token_type, "Non-refresh token offered for refresh");
            return Err(TokenError::InvalidTokenType(Kind::Refresh.label().to_string()));
        }

        self.sign(Kind::Access, claims.sub, claims.is_verified, claims.role)
    }

    fn refresh_token_expiry_secs(&self) -> i64 {
        self.config.refresh_token_expiry
    }
}
