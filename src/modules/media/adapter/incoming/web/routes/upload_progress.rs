use actix_web::{get, patch, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::VerifiedUser;
use crate::media::application::domain::{UploadStatus, UploadSummary};
use crate::media::application::ports::incoming::use_cases::{
    AdvanceUploadCommand, AdvanceUploadError, GetUploadProgressError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/uploads/{id}",
    params(("id" = Uuid, Path, description = "Upload id")),
    responses(
        (status = 200, description = "Upload summary", body = UploadSummary),
        (status = 404, description = "Upload not found")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
#[get("/api/uploads/{id}")]
pub async fn get_upload_progress_handler(
    user: VerifiedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .media
        .get_upload_progress
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(summary) => ApiResponse::success(summary),
        Err(GetUploadProgressError::NotFound) => {
            ApiResponse::not_found("UPLOAD_NOT_FOUND", "Upload not found")
        }
        Err(GetUploadProgressError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, "Repository error loading upload: {}", e);
            ApiResponse::internal_error()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdvanceUploadRequest {
    pub bytes_uploaded: u64,
    #[serde(default)]
    pub status: Option<UploadStatus>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/uploads/{id}",
    params(("id" = Uuid, Path, description = "Upload id")),
    request_body = AdvanceUploadRequest,
    responses(
        (status = 200, description = "Updated summary", body = UploadSummary),
        (status = 404, description = "Upload not found"),
        (status = 409, description = "Transition not allowed or upload changed concurrently")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
#[patch("/api/uploads/{id}")]
pub async fn advance_upload_handler(
    user: VerifiedUser,
    path: web::Path<Uuid>,
    req: web::Json<AdvanceUploadRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let command = AdvanceUploadCommand {
        owner: user.user_id.into(),
        upload_id: path.into_inner(),
        bytes_uploaded: req.bytes_uploaded,
        status: req.status,
        error_message: req.error_message,
    };

    match data.media.advance_upload.execute(command).await {
        Ok(summary) => ApiResponse::success(summary),
        Err(AdvanceUploadError::NotFound) => {
            ApiResponse::not_found("UPLOAD_NOT_FOUND", "Upload not found")
        }
        Err(e @ AdvanceUploadError::InvalidStateTransition { .. }) => {
            ApiResponse::conflict("INVALID_STATE_TRANSITION", &e.to_string())
        }
        Err(e @ AdvanceUploadError::Conflict) => ApiResponse::conflict("UPLOAD_CONFLICT", &e.to_string()),
        Err(AdvanceUploadError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, "Repository error advancing upload: {}", e);
            ApiResponse::internal_error()
        }
    }
}
