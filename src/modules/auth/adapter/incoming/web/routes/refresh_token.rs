use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::refresh_token::{
    RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    /// Refresh token issued at login
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Refresh access token
///
/// Exchanges a live refresh token for a new access token. The refresh token itself is not rotated.
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New access token", body = inline(SuccessResponse<RefreshTokenResponse>)),
        (status = 400, description = "Empty token", body = ErrorResponse),
        (status = 401, description = "Expired, revoked or invalid refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh-token")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match RefreshTokenRequest::new(req.into_inner().refresh_token) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!("Token refresh attempt");

    match data.refresh_token_use_case.execute(request).await {
        Ok(response) => {
            info!("Token refreshed successfully");
            ApiResponse::success(response)
        }

        Err(RefreshTokenError::TokenExpired) => {
            warn!("Token refresh failed: token expired");
            ApiResponse::unauthorized("TOKEN_EXPIRED", "Refresh token has expired")
        }

        Err(RefreshTokenError::TokenRevoked) => {
            warn!("Token refresh failed: token revoked");
            ApiResponse::unauthorized("TOKEN_REVOKED", "Refresh token has been revoked")
        }

        Err(RefreshTokenError::InvalidTokenType) => {
            warn!("Token refresh failed: wrong token type");
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "A refresh token is required")
        }

        Err(RefreshTokenError::TokenInvalid) => {
            warn!("Token refresh failed: invalid token");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }

        Err(ref e @ RefreshTokenError::TokenGenerationFailed(_))
        | Err(ref e @ RefreshTokenError::RepositoryError(_)) => {
            error!(error = %e, "Token refresh failed");
            ApiResponse::internal_error()
        }
    }
}
