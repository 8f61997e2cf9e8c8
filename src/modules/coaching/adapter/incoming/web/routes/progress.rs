use actix_web::{get, post, web, Responder};

use super::coaching_errors::map_coaching_error;
use crate::auth::adapter::incoming::web::extractors::ClientUser;
use crate::coaching::application::ports::incoming::use_cases::{
    ProgressView, RecordProgressRequest, RecordProgressResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Records a completed exercise and evaluates achievements.
#[utoipa::path(
    post,
    path = "/api/progress",
    request_body = RecordProgressRequest,
    responses(
        (status = 201, description = "Progress recorded", body = RecordProgressResponse),
        (status = 400, description = "Not exactly one target or rating out of range")
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[post("/api/progress")]
pub async fn record_progress_handler(
    user: ClientUser,
    req: web::Json<RecordProgressRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .coaching
        .record_progress
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(recorded) => ApiResponse::created(recorded),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/progress",
    responses((status = 200, description = "Own progress, newest first", body = [ProgressView])),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/progress")]
pub async fn list_progress_handler(user: ClientUser, data: web::Data<AppState>) -> impl Responder {
    match data.coaching.list_progress.execute(user.user_id.into()).await {
        Ok(entries) => ApiResponse::success(entries),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::auth::application::domain::entities::UserRole;
    use crate::coaching::application::coaching_use_cases::CoachingUseCases;
    use crate::coaching::application::domain::{Achievement, AchievementCriteria, AchievementType};
    use crate::coaching::application::service::test_doubles::InMemoryCoaching;
    use crate::program::application::service::test_doubles::InMemoryPrograms;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider};
    use crate::tests::support::in_memory_users::InMemoryUsers;

    async fn run(repo: InMemoryCoaching, req: test::TestRequest, role: UserRole) -> (StatusCode, Value) {
        let coaching = CoachingUseCases::from_repository(
            repo,
            Arc::new(InMemoryUsers::default()),
            Arc::new(InMemoryPrograms::default()),
        );
        let app_state = TestAppStateBuilder::default().with_coaching(coaching).build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(web::Data::new(test_token_provider()))
                .app_data(custom_json_config())
                .service(record_progress_handler)
                .service(list_progress_handler),
        )
        .await;

        let req = req.insert_header(bearer(Uuid::new_v4(), true, role)).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn record(body: Value) -> test::TestRequest {
        test::TestRequest::post().uri("/api/progress").set_json(body)
    }

    #[actix_web::test]
    async fn test_record_progress_with_new_achievement() {
        let repo = InMemoryCoaching::default();
        repo.add_achievement(Achievement {
            id: Uuid::new_v4(),
            name: "First step".to_string(),
            description: String::new(),
            achievement_type: AchievementType::Milestone,
            icon_url: String::new(),
            criteria: AchievementCriteria {
                exercise_count: Some(1),
                days_streak: None,
            },
            created_at: Utc::now(),
            is_active: true,
        });

        let session = Uuid::new_v4();
        let (status, body) = run(
            repo,
            record(json!({"meditation_session_id": session, "duration_seconds": 600, "difficulty_rating": 3})),
            UserRole::Client,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["progress"]["meditation_session_id"], session.to_string());
        assert_eq!(body["data"]["new_achievements"][0]["achievement"]["name"], "First step");
    }

    #[actix_web::test]
    async fn test_record_progress_without_target() {
        let (status, body) = run(
            InMemoryCoaching::default(),
            record(json!({"duration_seconds": 60})),
            UserRole::Client,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_TARGET");
    }

    #[actix_web::test]
    async fn test_record_progress_rating_out_of_range() {
        let (status, body) = run(
            InMemoryCoaching::default(),
            record(json!({"exercise_id": Uuid::new_v4(), "duration_seconds": 60, "difficulty_rating": 6})),
            UserRole::Client,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DIFFICULTY_RATING");
    }

    #[actix_web::test]
    async fn test_instructor_cannot_record_progress() {
        let (status, _) = run(
            InMemoryCoaching::default(),
            record(json!({"exercise_id": Uuid::new_v4(), "duration_seconds": 60})),
            UserRole::Instructor,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_list_progress_empty() {
        let (status, body) = run(
            InMemoryCoaching::default(),
            test::TestRequest::get().uri("/api/progress"),
            UserRole::Client,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
    }
}
