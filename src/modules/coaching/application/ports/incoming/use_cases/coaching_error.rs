use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserQueryError;
use crate::coaching::application::domain::ProgressValidationError;
use crate::coaching::application::ports::outgoing::CoachingRepositoryError;
use crate::program::application::ports::outgoing::ProgramRepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachingError {
    #[error(transparent)]
    Validation(#[from] ProgressValidationError),

    #[error("No client account with that email")]
    ClientNotFound,

    #[error("User is not a client")]
    NotAClient,

    #[error("Client is already assigned to this instructor")]
    AlreadyAssigned,

    #[error("Routine {0} does not exist")]
    UnknownRoutine(Uuid),

    #[error("Relationship not found")]
    RelationshipNotFound,

    #[error("Routine not found")]
    RoutineNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<CoachingRepositoryError> for CoachingError {
    fn from(err: CoachingRepositoryError) -> Self {
        match err {
            CoachingRepositoryError::Conflict => CoachingError::AlreadyAssigned,
            CoachingRepositoryError::NotFound => CoachingError::RelationshipNotFound,
            CoachingRepositoryError::DatabaseError(msg) => CoachingError::RepositoryError(msg),
        }
    }
}

impl From<UserQueryError> for CoachingError {
    fn from(err: UserQueryError) -> Self {
        CoachingError::RepositoryError(err.to_string())
    }
}

impl From<ProgramRepositoryError> for CoachingError {
    fn from(err: ProgramRepositoryError) -> Self {
        CoachingError::RepositoryError(err.to_string())
    }
}
