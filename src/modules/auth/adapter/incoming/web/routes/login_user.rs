use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest, LoginUserResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "client@example.com")]
    pub email: String,
    #[schema(example = "a long calm passphrase")]
    pub password: String,
}

/// Exchange email and password for an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginUserResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let LoginRequestDto { email, password } = req.into_inner();
    info!(%email, "Login attempt");

    let request = match LoginRequest::new(email, password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.login_user_use_case.execute(request).await {
        Ok(session) => {
            info!(user_id = %session.user.id, role = %session.user.role, "Login succeeded");
            ApiResponse::success(session)
        }
        Err(e) => login_failure(e),
    }
}

fn login_failure(err: LoginError) -> HttpResponse {
    match err {
        // Deleted accounts look like bad credentials from the outside.
        LoginError::InvalidCredentials | LoginError::UserDeleted => {
            warn!("Login rejected");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        LoginError::PasswordVerificationFailed(_)
        | LoginError::TokenGenerationFailed(_)
        | LoginError::QueryError(_) => {
            error!(error = %err, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
