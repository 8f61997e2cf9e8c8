use actix_web::{delete, get, patch, post, web, Responder};
use uuid::Uuid;

use super::program_errors::map_program_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::program::application::ports::incoming::use_cases::{
    CreateRoutineRequest, ExerciseInput, RoutineView, UpdateRoutineRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/routines",
    request_body = CreateRoutineRequest,
    responses(
        (status = 201, description = "Routine created", body = RoutineView),
        (status = 400, description = "Invalid routine")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[post("/api/routines")]
pub async fn create_routine_handler(
    user: InstructorUser,
    req: web::Json<CreateRoutineRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .create_routine
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::created(routine),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/routines",
    responses((status = 200, description = "Own active routines", body = [RoutineView])),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[get("/api/routines")]
pub async fn list_routines_handler(user: InstructorUser, data: web::Data<AppState>) -> impl Responder {
    match data.program.list_routines.execute(user.user_id.into()).await {
        Ok(routines) => ApiResponse::success(routines),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/routines/{id}",
    params(("id" = Uuid, Path, description = "Routine id")),
    responses(
        (status = 200, description = "Routine", body = RoutineView),
        (status = 404, description = "Routine not found")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[get("/api/routines/{id}")]
pub async fn get_routine_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .get_routine
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::success(routine),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/routines/{id}",
    params(("id" = Uuid, Path, description = "Routine id")),
    request_body = UpdateRoutineRequest,
    responses(
        (status = 200, description = "Routine updated", body = RoutineView),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Routine not found")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[patch("/api/routines/{id}")]
pub async fn update_routine_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateRoutineRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .update_routine
        .execute(user.user_id.into(), path.into_inner(), req.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::success(routine),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    post,
    path = "/api/routines/{id}/exercises",
    params(("id" = Uuid, Path, description = "Routine id")),
    request_body = ExerciseInput,
    responses(
        (status = 201, description = "Exercise added", body = RoutineView),
        (status = 400, description = "Invalid exercise"),
        (status = 404, description = "Routine not found")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[post("/api/routines/{id}/exercises")]
pub async fn add_routine_exercise_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    req: web::Json<ExerciseInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .add_routine_exercise
        .execute(user.user_id.into(), path.into_inner(), req.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::created(routine),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/routines/{id}/exercises/{exercise_id}",
    params(
        ("id" = Uuid, Path, description = "Routine id"),
        ("exercise_id" = Uuid, Path, description = "Exercise id")
    ),
    responses(
        (status = 204, description = "Exercise removed"),
        (status = 404, description = "Routine or exercise not found")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[delete("/api/routines/{id}/exercises/{exercise_id}")]
pub async fn remove_routine_exercise_handler(
    user: InstructorUser,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (routine_id, exercise_id) = path.into_inner();
    match data
        .program
        .remove_routine_exercise
        .execute(user.user_id.into(), routine_id, exercise_id)
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => map_program_error(user.user_id, e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/routines/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Routine id")),
    responses(
        (status = 200, description = "Routine deactivated", body = RoutineView),
        (status = 404, description = "Routine not found")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
#[patch("/api/routines/{id}/deactivate")]
pub async fn deactivate_routine_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .program
        .deactivate_routine
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::success(routine),
        Err(e) => map_program_error(user.user_id, e),
    }
}
