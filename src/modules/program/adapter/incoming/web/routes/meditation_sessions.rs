use actix_web::{get, post, web, Responder};

use super::program_errors::map_program_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::program::application::ports::incoming::use_cases::{
    CreateMeditationSessionRequest, MeditationSessionView,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/meditation-sessions",
    request_body = CreateMeditationSessionRequest,
    responses(
        (status = 201, description = "Meditation session created", body = MeditationSessionView),
        (status = 400, description = "Invalid duration or name")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[post("/api/meditation-sessions")]
pub async fn create_meditation_session_handler(
    user: InstructorUser,
    req: web::Json<CreateMeditationSessionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .create_meditation_session
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(session) => ApiResponse::created(session),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/meditation-sessions",
    responses((status = 200, description = "Own active meditation sessions", body = [MeditationSessionView])),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[get("/api/meditation-sessions")]
pub async fn list_meditation_sessions_handler(
    user: InstructorUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .list_meditation_sessions
        .execute(user.user_id.into())
        .await
    {
        Ok(sessions) => ApiResponse::success(sessions),
        Err(e) => map_program_error(user.user_id, e),
    }
}
