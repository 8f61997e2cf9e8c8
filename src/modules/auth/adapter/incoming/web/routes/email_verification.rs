use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::outgoing::UserRepositoryError;
use crate::auth::application::use_cases::email_verification::{
    ConfirmTokenRequest, EmailVerificationError, EmailVerificationRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "If the account exists, an email has been sent")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmailVerifiedResponse {
    pub user_id: Uuid,
    pub message: String,
}

/// Request a verification email
///
/// Answers the same way for unknown, deleted and already verified addresses.
#[utoipa::path(
    post,
    path = "/api/auth/email-verification/request",
    tag = "auth",
    request_body = EmailVerificationRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/email-verification/request")]
pub async fn request_email_verification_handler(
    req: web::Json<EmailVerificationRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .request_email_verification_use_case
        .execute(&req.email)
        .await
    {
        Ok(()) => {
            info!("Verification email requested");
            ApiResponse::success(MessageResponse {
                message: "If the account exists, an email has been sent".to_string(),
            })
        }
        Err(e) => {
            error!(error = %e, "Verification request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Confirm an email address
///
/// Consumes a single-use verification token and marks the account verified.
#[utoipa::path(
    post,
    path = "/api/auth/email-verification/confirm",
    tag = "auth",
    request_body = ConfirmTokenRequest,
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<EmailVerifiedResponse>)),
        (
            status = 400,
            description = "Unknown, expired or consumed token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_TOKEN", "message": "Invalid or expired token" }
            })
        ),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/email-verification/confirm")]
pub async fn confirm_email_verification_handler(
    req: web::Json<ConfirmTokenRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .confirm_email_verification_use_case
        .execute(&req.token)
        .await
    {
        Ok(user_id) => {
            info!(user_id = %user_id, "Email verification confirmed");
            ApiResponse::success(EmailVerifiedResponse {
                user_id,
                message: "Email verified".to_string(),
            })
        }
        Err(EmailVerificationError::InvalidToken) => {
            warn!("Email verification with invalid token");
            ApiResponse::bad_request("INVALID_TOKEN", "Invalid or expired token")
        }
        Err(EmailVerificationError::RepositoryError(UserRepositoryError::UserNotFound)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::AuthTokenStoreError;
    use crate::auth::application::use_cases::email_verification::{
        IConfirmEmailVerificationUseCase, IRequestEmailVerificationUseCase,
    };
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct StubRequest(Result<(), EmailVerificationError>);

    #[async_trait]
    impl IRequestEmailVerificationUseCase for StubRequest {
        async fn execute(&self, _email: &str) -> Result<(), EmailVerificationError> {
            self.0.clone()
        }
    }

    #[derive(Clone)]
    struct StubConfirm(Result<Uuid, EmailVerificationError>);

    #[async_trait]
    impl IConfirmEmailVerificationUseCase for StubConfirm {
        async fn execute(&self, _token: &str) -> Result<Uuid, EmailVerificationError> {
            self.0.clone()
        }
    }

    async fn post(builder: TestAppStateBuilder, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(builder.build())
                .app_data(custom_json_config())
                .service(request_email_verification_handler)
                .service(confirm_email_verification_handler),
        )
        .await;

        let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_request_verification_is_generic() {
        let builder =
            TestAppStateBuilder::default().with_request_email_verification(StubRequest(Ok(())));
        let (status, body) = post(
            builder,
            "/api/auth/email-verification/request",
            json!({"email": "nobody@example.com"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["message"],
            "If the account exists, an email has been sent"
        );
    }

    #[actix_web::test]
    async fn test_request_verification_store_failure() {
        let err = EmailVerificationError::TokenStoreError(AuthTokenStoreError::DatabaseError(
            "down".into(),
        ));
        let builder =
            TestAppStateBuilder::default().with_request_email_verification(StubRequest(Err(err)));
        let (status, _) = post(
            builder,
            "/api/auth/email-verification/request",
            json!({"email": "a@example.com"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_confirm_verification_success() {
        let id = Uuid::new_v4();
        let builder =
            TestAppStateBuilder::default().with_confirm_email_verification(StubConfirm(Ok(id)));
        let (status, body) = post(
            builder,
            "/api/auth/email-verification/confirm",
            json!({"token": "abc"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user_id"], id.to_string());
    }

    #[actix_web::test]
    async fn test_confirm_verification_invalid_token() {
        let builder = TestAppStateBuilder::default()
            .with_confirm_email_verification(StubConfirm(Err(EmailVerificationError::InvalidToken)));
        let (status, body) = post(
            builder,
            "/api/auth/email-verification/confirm",
            json!({"token": "used"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn test_confirm_verification_user_gone() {
        let builder = TestAppStateBuilder::default().with_confirm_email_verification(StubConfirm(
            Err(EmailVerificationError::RepositoryError(UserRepositoryError::UserNotFound)),
        ));
        let (status, body) = post(
            builder,
            "/api/auth/email-verification/confirm",
            json!({"token": "abc"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    }
}
