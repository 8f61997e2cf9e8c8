use actix_web::{get, post, web, Responder};

use super::program_errors::map_program_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::program::application::ports::incoming::use_cases::{
    CombinedRoutineView, CreateCombinedRoutineRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/combined-routines",
    request_body = CreateCombinedRoutineRequest,
    responses(
        (status = 201, description = "Combined routine created", body = CombinedRoutineView),
        (status = 400, description = "Invalid name or unknown referenced program")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[post("/api/combined-routines")]
pub async fn create_combined_routine_handler(
    user: InstructorUser,
    req: web::Json<CreateCombinedRoutineRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .create_combined_routine
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(combined) => ApiResponse::created(combined),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/combined-routines",
    responses((status = 200, description = "Own active combined routines", body = [CombinedRoutineView])),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[get("/api/combined-routines")]
pub async fn list_combined_routines_handler(
    user: InstructorUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .list_combined_routines
        .execute(user.user_id.into())
        .await
    {
        Ok(combined) => ApiResponse::success(combined),
        Err(e) => map_program_error(user.user_id, e),
    }
}
