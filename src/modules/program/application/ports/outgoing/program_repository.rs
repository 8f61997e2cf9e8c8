use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{
    BreathingExercise, CombinedRoutine, MeditationSession, Routine,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramRepositoryError {
    #[error("Program not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Lists return the instructor's active records, newest first.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    async fn create_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError>;

    async fn list_routines(&self, instructor: UserId) -> Result<Vec<Routine>, ProgramRepositoryError>;

    async fn find_routine(
        &self,
        instructor: UserId,
        routine_id: Uuid,
    ) -> Result<Routine, ProgramRepositoryError>;

    async fn deactivate_routine(
        &self,
        instructor: UserId,
        routine_id: Uuid,
    ) -> Result<Routine, ProgramRepositoryError>;

    /// Writes name, description, exercises and `updated_at` of a routine the
    /// instructor owns. `NotFound` otherwise.
    async fn update_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError>;

    /// Active routines among `ids`, whoever owns them, newest first.
    async fn find_active_routines(&self, ids: &[Uuid]) -> Result<Vec<Routine>, ProgramRepositoryError>;
}

#[async_trait]
pub trait BreathingExerciseRepository: Send + Sync {
    async fn create_breathing_exercise(
        &self,
        exercise: &BreathingExercise,
    ) -> Result<BreathingExercise, ProgramRepositoryError>;

    async fn list_breathing_exercises(
        &self,
        instructor: UserId,
    ) -> Result<Vec<BreathingExercise>, ProgramRepositoryError>;
}

#[async_trait]
pub trait MeditationSessionRepository: Send + Sync {
    async fn create_meditation_session(
        &self,
        session: &MeditationSession,
    ) -> Result<MeditationSession, ProgramRepositoryError>;

    async fn list_meditation_sessions(
        &self,
        instructor: UserId,
    ) -> Result<Vec<MeditationSession>, ProgramRepositoryError>;
}

#[async_trait]
pub trait CombinedRoutineRepository: Send + Sync {
    async fn create_combined_routine(
        &self,
        combined: &CombinedRoutine,
    ) -> Result<CombinedRoutine, ProgramRepositoryError>;

    async fn list_combined_routines(
        &self,
        instructor: UserId,
    ) -> Result<Vec<CombinedRoutine>, ProgramRepositoryError>;
}
