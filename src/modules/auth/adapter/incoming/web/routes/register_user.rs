use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Request body for user registration
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// 3-30 letters, digits or underscores
    #[schema(example = "calm_coach")]
    pub username: String,

    #[schema(example = "coach@example.com")]
    pub email: String,

    /// 12 to 128 characters
    #[schema(example = "a long calm passphrase")]
    pub password: String,

    #[schema(example = "Calm Coach")]
    pub full_name: String,

    #[serde(default)]
    #[schema(example = "+62 812 3456 7890")]
    pub phone: Option<String>,

    /// `client` (default) or `instructor`
    #[serde(default)]
    #[schema(example = "instructor")]
    pub role: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterUserResponse {
    message: String,
    user: RegisteredUser,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    role: UserRole,
}

/// Field rule violations carry their own code; everything else is a
/// conflict or an internal failure.
fn map_create_user_error(err: CreateUserError, req: &CreateUserRequest) -> HttpResponse {
    let invalid = match &err {
        CreateUserError::InvalidUsername(msg) => Some(("INVALID_USERNAME", msg)),
        CreateUserError::InvalidEmail(msg) => Some(("INVALID_EMAIL", msg)),
        CreateUserError::InvalidPassword(msg) => Some(("INVALID_PASSWORD", msg)),
        CreateUserError::InvalidFullName(msg) => Some(("INVALID_FULL_NAME", msg)),
        CreateUserError::InvalidRole(msg) => Some(("INVALID_ROLE", msg)),
        _ => None,
    };

    if let Some((code, msg)) = invalid {
        warn!(username = %req.username, code, "Registration input rejected");
        return ApiResponse::bad_request(code, msg);
    }

    if err == CreateUserError::UserAlreadyExists {
        warn!(username = %req.username, "Username or email already registered");
        return ApiResponse::conflict("USER_ALREADY_EXISTS", "User already exists");
    }

    error!(username = %req.username, error = %err, "Registration failed");
    ApiResponse::internal_error()
}

/// Register a new user
///
/// Creates an unverified account and emails a verification link.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = inline(SuccessResponse<RegisterUserResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(username = %req.username, email = %req.email, "User registration attempt");

    let input = CreateUserInput {
        username: req.username.clone(),
        email: req.email.clone(),
        password: req.password.clone(),
        full_name: req.full_name.clone(),
        phone: req.phone.clone(),
        role: req.role.clone(),
    };

    match data.register_user_orchestrator.register_user(input).await {
        Ok(user) => {
            info!(user_id = %user.user_id, role = %user.role, "User registered");
            ApiResponse::created(RegisterUserResponse {
                message: user.message,
                user: RegisteredUser {
                    id: user.user_id,
                    username: user.username,
                    email: user.email,
                    full_name: user.full_name,
                    role: user.role,
                },
            })
        }
        Err(UserRegistrationError::CreateUserFailed(e)) => map_create_user_error(e, &req),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::UserRepositoryError;
    use crate::auth::application::use_cases::create_user::{CreateUserOutput, ICreateUserUseCase};
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::registration_orchestrator;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct FixedCreateUser(Result<(), CreateUserError>);

    #[async_trait]
    impl ICreateUserUseCase for FixedCreateUser {
        async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
            self.0.clone().map(|_| CreateUserOutput {
                user_id: Uuid::new_v4(),
                username: input.username,
                email: input.email,
                full_name: input.full_name,
                role: input
                    .role
                    .and_then(|r| r.parse().ok())
                    .unwrap_or_default(),
            })
        }
    }

    async fn register(result: Result<(), CreateUserError>, body: Value) -> (StatusCode, Value) {
        let app_state = TestAppStateBuilder::default()
            .with_register_user_orchestrator(registration_orchestrator(FixedCreateUser(result)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(custom_json_config())
                .service(register_user_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    fn body() -> Value {
        json!({
            "username": "calm_coach",
            "email": "coach@example.com",
            "password": "a long calm passphrase",
            "full_name": "Calm Coach",
            "role": "instructor"
        })
    }

    #[actix_web::test]
    async fn test_register_created() {
        let (status, body) = register(Ok(()), body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["role"], "instructor");
        assert_eq!(body["data"]["user"]["username"], "calm_coach");
    }

    #[actix_web::test]
    async fn test_register_validation_codes() {
        let cases = [
            (CreateUserError::InvalidUsername("bad".into()), "INVALID_USERNAME"),
            (CreateUserError::InvalidEmail("bad".into()), "INVALID_EMAIL"),
            (CreateUserError::InvalidPassword("short".into()), "INVALID_PASSWORD"),
            (CreateUserError::InvalidFullName("empty".into()), "INVALID_FULL_NAME"),
            (CreateUserError::InvalidRole("admin".into()), "INVALID_ROLE"),
        ];

        for (err, code) in cases {
            let (status, body) = register(Err(err), body()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], code);
        }
    }

    #[actix_web::test]
    async fn test_register_conflict() {
        let (status, body) = register(Err(CreateUserError::UserAlreadyExists), body()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");
    }

    #[actix_web::test]
    async fn test_register_repository_error_is_internal() {
        let err = CreateUserError::RepositoryError(UserRepositoryError::DatabaseError(
            "down".into(),
        ));
        let (status, body) = register(Err(err), body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[actix_web::test]
    async fn test_register_missing_field() {
        let (status, body) = register(Ok(()), json!({"username": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
