use actix_web::{http::header::CONTENT_TYPE, post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use super::command_errors::map_command_error;
use crate::auth::adapter::incoming::web::extractors::InstructorUser;
use crate::media::application::ports::incoming::use_cases::{UploadMediaCommand, UploadMediaError};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UploadMediaQuery {
    pub name: String,
    pub category: String,
    pub file_name: String,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

/// Traditional upload. The raw file is the request body; its type is the
/// `Content-Type` header.
#[utoipa::path(
    post,
    path = "/api/media",
    params(UploadMediaQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Asset stored and catalogued"),
        (status = 400, description = "Invalid content type, size or metadata"),
        (status = 403, description = "Instructor role required"),
        (status = 502, description = "Object store failure")
    ),
    security(("bearer_auth" = [])),
    tag = "media"
)]
#[post("/api/media")]
pub async fn upload_media_handler(
    user: InstructorUser,
    query: web::Query<UploadMediaQuery>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .unwrap_or_default();

    let command = match UploadMediaCommand::builder()
        .owner(user.user_id.into())
        .name(query.name)
        .category(query.category)
        .file_name(query.file_name)
        .content_type(content_type)
        .duration_seconds(query.duration_seconds)
        .bytes(body.to_vec())
        .build()
    {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.media.upload.execute(command).await {
        Ok(uploaded) => ApiResponse::created(uploaded),

        Err(e @ UploadMediaError::InvalidContentType { .. }) => {
            ApiResponse::bad_request("INVALID_CONTENT_TYPE", &e.to_string())
        }

        Err(e @ UploadMediaError::FileTooLarge { .. }) => {
            ApiResponse::bad_request("FILE_TOO_LARGE", &e.to_string())
        }

        Err(UploadMediaError::StorageUploadFailed(e)) => {
            error!(user_id = %user.user_id, "Storage upload failed: {}", e);
            ApiResponse::storage_error("Failed to store file")
        }

        Err(UploadMediaError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, "Repository error recording asset: {}", e);
            ApiResponse::internal_error()
        }
    }
}
