use actix_web::HttpResponse;
use tracing::error;
use uuid::Uuid;

use crate::program::application::domain::ProgramValidationError;
use crate::program::application::ports::incoming::use_cases::ProgramError;
use crate::shared::api::ApiResponse;

pub fn map_program_error(user_id: Uuid, e: ProgramError) -> HttpResponse {
    match e {
        ProgramError::Validation(
            ref inner @ (ProgramValidationError::EmptyName | ProgramValidationError::NameTooLong),
        ) => ApiResponse::bad_request("INVALID_NAME", &inner.to_string()),
        ProgramError::Validation(inner) => ApiResponse::bad_request("INVALID_VALUE", &inner.to_string()),
        ProgramError::UnknownReference(_) => ApiResponse::bad_request("UNKNOWN_REFERENCE", &e.to_string()),
        ProgramError::NotFound => ApiResponse::not_found("PROGRAM_NOT_FOUND", "Program not found"),
        ProgramError::ExerciseNotFound => ApiResponse::not_found("EXERCISE_NOT_FOUND", &e.to_string()),
        ProgramError::RepositoryError(msg) => {
            error!(user_id = %user_id, "Program repository error: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
