use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use super::command_errors::map_command_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::media::application::ports::incoming::use_cases::{
    DirectUploadTicket, InitDirectUploadCommand, InitDirectUploadError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct InitDirectUploadRequest {
    pub category: String,
    pub file_name: String,
    pub content_type: String,
}

#[utoipa::path(
    post,
    path = "/api/media/direct-upload",
    request_body = InitDirectUploadRequest,
    responses(
        (status = 201, description = "Signed upload URL issued", body = DirectUploadTicket),
        (status = 400, description = "Invalid category, file name or content type"),
        (status = 502, description = "Object store failure")
    ),
    security(("bearer_auth" = [])),
    tag = "media"
)]
#[post("/api/media/direct-upload")]
pub async fn init_direct_upload_handler(
    user: InstructorUser,
    req: web::Json<InitDirectUploadRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let command = match InitDirectUploadCommand::new(
        user.user_id.into(),
        &req.category,
        &req.file_name,
        req.content_type.trim().to_ascii_lowercase(),
    ) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.media.init_direct_upload.execute(command).await {
        Ok(ticket) => ApiResponse::created(ticket),

        Err(e @ InitDirectUploadError::InvalidContentType { .. }) => {
            ApiResponse::bad_request("INVALID_CONTENT_TYPE", &e.to_string())
        }

        Err(InitDirectUploadError::StorageError(e)) => {
            error!(user_id = %user.user_id, "Storage error signing upload URL: {}", e);
            ApiResponse::storage_error("Failed to generate upload URL")
        }

        Err(InitDirectUploadError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, "Repository error recording direct upload: {}", e);
            ApiResponse::internal_error()
        }
    }
}
