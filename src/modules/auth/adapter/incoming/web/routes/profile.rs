use actix_web::{get, patch, web, Responder};
use tracing::{error, info, warn};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserRepositoryError;
use crate::auth::application::use_cases::fetch_profile::{FetchUserError, UserProfile};
use crate::auth::application::use_cases::update_profile::{
    UpdateProfileRequest, UpdateUserError, UpdateUserInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Get own profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<UserProfile>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/api/users/me")]
pub async fn get_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .fetch_user_profile_use_case
        .execute(UserId::from(user.user_id))
        .await
    {
        Ok(profile) => ApiResponse::success(profile),
        Err(FetchUserError::UserNotFound(_)) => {
            warn!(user_id = %user.user_id, "Profile requested for missing user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Failed to fetch profile");
            ApiResponse::internal_error()
        }
    }
}

/// Update own profile
///
/// Updates full name, phone and preferences. Changing the password requires `current_password`.
#[utoipa::path(
    patch,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<UserProfile>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing token or wrong current password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[patch("/api/users/me")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let input = UpdateUserInput {
        user_id: UserId::from(user.user_id),
        changes: req.into_inner(),
    };

    match data.update_user_profile_use_case.execute(input).await {
        Ok(profile) => {
            info!(user_id = %user.user_id, "Profile updated");
            ApiResponse::success(profile)
        }
        Err(UpdateUserError::InvalidFullName(msg)) => {
            ApiResponse::bad_request("INVALID_FULL_NAME", &msg)
        }
        Err(UpdateUserError::InvalidPhone) => {
            ApiResponse::bad_request("INVALID_PHONE", "Invalid phone number")
        }
        Err(UpdateUserError::InvalidPassword(msg)) => {
            ApiResponse::bad_request("INVALID_PASSWORD", &msg)
        }
        Err(UpdateUserError::CurrentPasswordRequired) => ApiResponse::bad_request(
            "CURRENT_PASSWORD_REQUIRED",
            "Current password is required to set a new one",
        ),
        Err(UpdateUserError::IncorrectPassword) => {
            ApiResponse::unauthorized("INCORRECT_PASSWORD", "Current password is incorrect")
        }
        Err(UpdateUserError::UserNotFound)
        | Err(UpdateUserError::RepositoryError(UserRepositoryError::UserNotFound)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Failed to update profile");
            ApiResponse::internal_error()
        }
    }
}
