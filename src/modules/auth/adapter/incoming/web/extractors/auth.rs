use actix_web::{
    dev::Payload, error::InternalError, web, Error as ActixError, FromRequest, HttpRequest,
    HttpResponse,
};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::shared::api::ApiResponse;

/// Bearer access token holder, verified email or not.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub is_verified: bool,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Verified instructor (admins pass as well).
#[derive(Debug, Clone)]
pub struct InstructorUser {
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ClientUser {
    pub user_id: Uuid,
}

fn reject(response: HttpResponse) -> ActixError {
    InternalError::from_response("", response).into()
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let Some(provider) = req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>() else {
        tracing::error!("Token provider is not registered as app data");
        return Err(reject(ApiResponse::internal_error()));
    };

    let token = bearer_token(req).ok_or_else(|| {
        reject(ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        ))
    })?;

    let claims = provider.verify_token(token).map_err(|_| {
        reject(ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token"))
    })?;

    if claims.token_type != "access" {
        return Err(reject(ApiResponse::unauthorized(
            "INVALID_TOKEN_TYPE",
            "Invalid token type",
        )));
    }

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        is_verified: claims.is_verified,
        role: claims.role,
    })
}

fn verified(req: &HttpRequest) -> Result<VerifiedUser, ActixError> {
    let user = authenticate(req)?;
    if !user.is_verified {
        return Err(reject(ApiResponse::forbidden(
            "EMAIL_NOT_VERIFIED",
            "Email verification required",
        )));
    }
    Ok(VerifiedUser {
        user_id: user.user_id,
        role: user.role,
    })
}

fn with_role(
    req: &HttpRequest,
    allowed: impl FnOnce(UserRole) -> bool,
    message: &str,
) -> Result<Uuid, ActixError> {
    let user = verified(req)?;
    if allowed(user.role) {
        return Ok(user.user_id);
    }
    tracing::warn!(user_id = %user.user_id, role = %user.role, "{message}");
    Err(reject(ApiResponse::forbidden("INSUFFICIENT_ROLE", message)))
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for VerifiedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(verified(req))
    }
}

impl FromRequest for InstructorUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            with_role(req, |role| role.can_instruct(), "Instructor role required")
                .map(|user_id| InstructorUser { user_id }),
        )
    }
}

impl FromRequest for ClientUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            with_role(req, |role| role == UserRole::Client, "Client role required")
                .map(|user_id| ClientUser { user_id }),
        )
    }
}
