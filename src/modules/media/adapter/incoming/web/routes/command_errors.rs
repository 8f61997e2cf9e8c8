use actix_web::HttpResponse;

use crate::media::application::ports::incoming::use_cases::MediaCommandError;
use crate::shared::api::ApiResponse;

pub fn map_command_error(e: MediaCommandError) -> HttpResponse {
    match e {
        MediaCommandError::MissingField(field) => {
            ApiResponse::bad_request("MISSING_FIELD", &format!("Missing field: {}", field))
        }
        MediaCommandError::InvalidFileName => {
            ApiResponse::bad_request("INVALID_FILE_NAME", "Invalid file name")
        }
        MediaCommandError::NameTooLong => ApiResponse::bad_request("NAME_TOO_LONG", &e.to_string()),
        MediaCommandError::UnknownCategory(inner) => {
            ApiResponse::bad_request("UNKNOWN_CATEGORY", &inner.to_string())
        }
    }
}
