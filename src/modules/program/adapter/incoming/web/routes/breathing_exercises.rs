use actix_web::{get, post, web, Responder};

use super::program_errors::map_program_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::program::application::ports::incoming::use_cases::{
    BreathingExerciseView, CreateBreathingExerciseRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/breathing-exercises",
    request_body = CreateBreathingExerciseRequest,
    responses(
        (status = 201, description = "Breathing exercise created", body = BreathingExerciseView),
        (status = 400, description = "Invalid pattern or name")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[post("/api/breathing-exercises")]
pub async fn create_breathing_exercise_handler(
    user: InstructorUser,
    req: web::Json<CreateBreathingExerciseRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .create_breathing_exercise
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(exercise) => ApiResponse::created(exercise),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/breathing-exercises",
    responses((status = 200, description = "Own active breathing exercises", body = [BreathingExerciseView])),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[get("/api/breathing-exercises")]
pub async fn list_breathing_exercises_handler(
    user: InstructorUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .list_breathing_exercises
        .execute(user.user_id.into())
        .await
    {
        Ok(exercises) => ApiResponse::success(exercises),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::auth::application::domain::entities::UserRole;
    use crate::program::application::program_use_cases::ProgramUseCases;
    use crate::program::application::service::test_doubles::InMemoryPrograms;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider};

    async fn run(repo: InMemoryPrograms, req: test::TestRequest, user_id: Uuid) -> (StatusCode, Value) {
        let app_state = TestAppStateBuilder::default()
            .with_program(ProgramUseCases::from_repository(repo))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(web::Data::new(test_token_provider()))
                .app_data(custom_json_config())
                .service(create_breathing_exercise_handler)
                .service(list_breathing_exercises_handler),
        )
        .await;

        let req = req
            .insert_header(bearer(user_id, true, UserRole::Instructor))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[actix_web::test]
    async fn test_create_box_breathing() {
        let repo = InMemoryPrograms::default();
        let user_id = Uuid::new_v4();
        let req = test::TestRequest::post()
            .uri("/api/breathing-exercises")
            .set_json(json!({
                "name": "Box",
                "inhale_seconds": 4,
                "hold_seconds": 4,
                "exhale_seconds": 4,
                "cycles": 5,
                "pattern_type": "box",
                "cue_style": "guided"
            }));

        let (status, body) = run(repo.clone(), req, user_id).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["total_duration_seconds"], 60);
        assert_eq!(body["data"]["pattern_type"], "box");
        assert_eq!(body["data"]["difficulty"], "beginner");

        let (status, body) = run(
            repo,
            test::TestRequest::get().uri("/api/breathing-exercises"),
            user_id,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_zero_inhale_rejected() {
        let req = test::TestRequest::post()
            .uri("/api/breathing-exercises")
            .set_json(json!({"name": "Broken", "inhale_seconds": 0}));

        let (status, body) = run(InMemoryPrograms::default(), req, Uuid::new_v4()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_VALUE");
    }

    #[actix_web::test]
    async fn test_unknown_pattern_type_rejected_by_json_config() {
        let req = test::TestRequest::post()
            .uri("/api/breathing-exercises")
            .set_json(json!({"name": "Odd", "pattern_type": "square"}));

        let (status, body) = run(InMemoryPrograms::default(), req, Uuid::new_v4()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
