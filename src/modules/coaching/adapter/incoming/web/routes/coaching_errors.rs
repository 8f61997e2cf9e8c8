use actix_web::HttpResponse;
use tracing::error;
use uuid::Uuid;

use crate::coaching::application::domain::ProgressValidationError;
use crate::coaching::application::ports::incoming::use_cases::CoachingError;
use crate::shared::api::ApiResponse;

pub fn map_coaching_error(user_id: Uuid, e: CoachingError) -> HttpResponse {
    match e {
        CoachingError::Validation(ProgressValidationError::TargetCount) => {
            ApiResponse::bad_request("INVALID_TARGET", &e.to_string())
        }
        CoachingError::Validation(ProgressValidationError::DifficultyRating) => {
            ApiResponse::bad_request("INVALID_DIFFICULTY_RATING", &e.to_string())
        }
        CoachingError::ClientNotFound => ApiResponse::not_found("CLIENT_NOT_FOUND", &e.to_string()),
        CoachingError::NotAClient => ApiResponse::bad_request("NOT_A_CLIENT", &e.to_string()),
        CoachingError::AlreadyAssigned => ApiResponse::conflict("ALREADY_ASSIGNED", &e.to_string()),
        CoachingError::UnknownRoutine(_) => ApiResponse::bad_request("UNKNOWN_REFERENCE", &e.to_string()),
        CoachingError::RelationshipNotFound => {
            ApiResponse::not_found("RELATIONSHIP_NOT_FOUND", &e.to_string())
        }
        CoachingError::RoutineNotFound => ApiResponse::not_found("ROUTINE_NOT_FOUND", &e.to_string()),
        CoachingError::RepositoryError(msg) => {
            error!(user_id = %user_id, "Coaching repository error: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
