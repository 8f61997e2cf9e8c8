use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

use super::email_verification::MessageResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::outgoing::UserRepositoryError;
use crate::auth::application::use_cases::password_reset::{
    PasswordResetConfirmRequest, PasswordResetError, PasswordResetRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Request a password reset
///
/// Always answers the same way so callers cannot tell which emails are registered.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/request",
    tag = "auth",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/request")]
pub async fn request_password_reset_handler(
    req: web::Json<PasswordResetRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.request_password_reset_use_case.execute(&req.email).await {
        Ok(()) => {
            info!("Password reset requested");
            ApiResponse::success(MessageResponse {
                message: "If the account exists, an email has been sent".to_string(),
            })
        }
        Err(e) => {
            error!(error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Confirm a password reset
///
/// Consumes a single-use reset token and stores the new password.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/confirm",
    tag = "auth",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 200, description = "Password updated", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Invalid token or weak password", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/confirm")]
pub async fn confirm_password_reset_handler(
    req: web::Json<PasswordResetConfirmRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .confirm_password_reset_use_case
        .execute(&req.token, &req.new_password)
        .await
    {
        Ok(()) => ApiResponse::success(MessageResponse {
            message: "Password has been reset".to_string(),
        }),
        Err(PasswordResetError::InvalidToken) => {
            warn!("Password reset with invalid token");
            ApiResponse::bad_request("INVALID_TOKEN", "Invalid or expired token")
        }
        Err(PasswordResetError::InvalidPassword(msg)) => {
            ApiResponse::bad_request("INVALID_PASSWORD", &msg)
        }
        Err(PasswordResetError::RepositoryError(UserRepositoryError::UserNotFound)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}
