use crate::api::schemas::SuccessResponse;
use crate::auth::application::use_cases::logout_user::{LogoutRequest, LogoutResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::info;

/// Logout
///
/// Revokes the supplied refresh token until it would have expired. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    request_body = LogoutRequest,
    responses(
        (
            status = 200,
            description = "Logged out",
            body = inline(SuccessResponse<LogoutResponse>),
            example = json!({
                "success": true,
                "data": { "message": "Logged out successfully" }
            })
        ),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    req: web::Json<LogoutRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest::new(req.into_inner().refresh_token);
    info!(has_token = request.refresh_token().is_some(), "User logout attempt");

    let response = data.logout_user_use_case.execute(request).await;
    ApiResponse::success(response)
}
