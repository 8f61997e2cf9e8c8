use actix_web::{get, patch, post, web, Responder};
use uuid::Uuid;

use super::coaching_errors::map_coaching_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::coaching::application::ports::incoming::use_cases::{
    AssignClientRequest, AssignedClientView, UpdateAssignedRoutinesRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/relationships",
    request_body = AssignClientRequest,
    responses(
        (status = 201, description = "Client assigned", body = AssignedClientView),
        (status = 400, description = "Target is not a client or routine unknown"),
        (status = 404, description = "No client with that email"),
        (status = 409, description = "Client already assigned")
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[post("/api/relationships")]
pub async fn assign_client_handler(
    user: InstructorUser,
    req: web::Json<AssignClientRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .coaching
        .assign_client
        .execute(user.user_id.into(), req.into_inner())
        .await
    {
        Ok(client) => ApiResponse::created(client),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/relationships/clients",
    responses((status = 200, description = "Assigned clients", body = [AssignedClientView])),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/relationships/clients")]
pub async fn list_clients_handler(user: InstructorUser, data: web::Data<AppState>) -> impl Responder {
    match data.coaching.list_clients.execute(user.user_id.into()).await {
        Ok(clients) => ApiResponse::success(clients),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/relationships/{id}/routines",
    params(("id" = Uuid, Path, description = "Relationship id")),
    request_body = UpdateAssignedRoutinesRequest,
    responses(
        (status = 200, description = "Assigned routines replaced", body = AssignedClientView),
        (status = 400, description = "Routine unknown or not owned"),
        (status = 404, description = "Relationship not found")
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[patch("/api/relationships/{id}/routines")]
pub async fn update_assigned_routines_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateAssignedRoutinesRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .coaching
        .update_assigned_routines
        .execute(user.user_id.into(), path.into_inner(), req.into_inner())
        .await
    {
        Ok(client) => ApiResponse::success(client),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}
