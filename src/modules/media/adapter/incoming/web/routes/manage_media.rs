use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use tracing::error;
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::media::application::ports::incoming::use_cases::{ManageMediaError, MediaAssetView};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn map_manage_error(user_id: Uuid, e: ManageMediaError) -> HttpResponse {
    match e {
        ManageMediaError::NotFound => {
            ApiResponse::not_found("MEDIA_NOT_FOUND", "Media asset not found")
        }
        ManageMediaError::RepositoryError(msg) => {
            error!(user_id = %user_id, "Media repository error: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

/// Own active assets, newest first.
#[utoipa::path(
    get,
    path = "/api/media",
    responses((status = 200, description = "Active media assets", body = [MediaAssetView])),
    security(("bearer_auth" = [])),
    tag = "media"
)]
#[get("/api/media")]
pub async fn list_media_handler(user: InstructorUser, data: web::Data<AppState>) -> impl Responder {
    match data.media.list.execute(user.user_id.into()).await {
        Ok(assets) => ApiResponse::success(assets),
        Err(e) => map_manage_error(user.user_id, e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/media/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Media asset id")),
    responses(
        (status = 200, description = "Asset deactivated", body = MediaAssetView),
        (status = 404, description = "Asset not found")
    ),
    security(("bearer_auth" = [])),
    tag = "media"
)]
#[patch("/api/media/{id}/deactivate")]
pub async fn deactivate_media_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .media
        .deactivate
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(asset) => ApiResponse::success(asset),
        Err(e) => map_manage_error(user.user_id, e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    params(("id" = Uuid, Path, description = "Media asset id")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found")
    ),
    security(("bearer_auth" = [])),
    tag = "media"
)]
#[delete("/api/media/{id}")]
pub async fn delete_media_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .media
        .delete
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => map_manage_error(user.user_id, e),
    }
}
