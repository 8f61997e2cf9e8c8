use uuid::Uuid;

use crate::program::application::domain::ProgramValidationError;
use crate::program::application::ports::outgoing::ProgramRepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Validation(#[from] ProgramValidationError),

    #[error("Referenced program {0} does not exist")]
    UnknownReference(Uuid),

    #[error("Program not found")]
    NotFound,

    #[error("Exercise not found in routine")]
    ExerciseNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ProgramRepositoryError> for ProgramError {
    fn from(err: ProgramRepositoryError) -> Self {
        match err {
            ProgramRepositoryError::NotFound => ProgramError::NotFound,
            ProgramRepositoryError::DatabaseError(msg) => ProgramError::RepositoryError(msg),
        }
    }
}
