use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::command_errors::map_command_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::media::application::ports::incoming::use_cases::{
    CompleteDirectUploadCommand, CompleteDirectUploadError, UploadedMedia,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteDirectUploadRequest {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

#[utoipa::path(
    post,
    path = "/api/uploads/{id}/complete",
    params(("id" = Uuid, Path, description = "Upload id returned by the direct-upload call")),
    request_body = CompleteDirectUploadRequest,
    responses(
        (status = 201, description = "Asset catalogued, upload completed", body = UploadedMedia),
        (status = 400, description = "Invalid name, content type or size"),
        (status = 404, description = "Upload not found"),
        (status = 409, description = "Upload already finished or changed concurrently")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
#[post("/api/uploads/{id}/complete")]
pub async fn complete_direct_upload_handler(
    user: InstructorUser,
    path: web::Path<Uuid>,
    req: web::Json<CompleteDirectUploadRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let CompleteDirectUploadRequest {
        name,
        size_bytes,
        duration_seconds,
    } = req.into_inner();

    let command = match CompleteDirectUploadCommand::new(
        user.user_id.into(),
        path.into_inner(),
        name,
        size_bytes,
        duration_seconds,
    ) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.media.complete_direct_upload.execute(command).await {
        Ok(uploaded) => ApiResponse::created(uploaded),
        Err(CompleteDirectUploadError::NotFound) => {
            ApiResponse::not_found("UPLOAD_NOT_FOUND", "Upload not found")
        }
        Err(e @ CompleteDirectUploadError::NotDirectUpload) => {
            ApiResponse::bad_request("NOT_DIRECT_UPLOAD", &e.to_string())
        }
        Err(e @ CompleteDirectUploadError::InvalidContentType { .. }) => {
            ApiResponse::bad_request("INVALID_CONTENT_TYPE", &e.to_string())
        }
        Err(e @ CompleteDirectUploadError::FileTooLarge { .. }) => {
            ApiResponse::bad_request("FILE_TOO_LARGE", &e.to_string())
        }
        Err(e @ CompleteDirectUploadError::AlreadyFinished(_)) => {
            ApiResponse::conflict("UPLOAD_FINISHED", &e.to_string())
        }
        Err(e @ CompleteDirectUploadError::Conflict) => ApiResponse::conflict("UPLOAD_CONFLICT", &e.to_string()),
        Err(CompleteDirectUploadError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, "Repository error completing direct upload: {}", e);
            ApiResponse::internal_error()
        }
    }
}
