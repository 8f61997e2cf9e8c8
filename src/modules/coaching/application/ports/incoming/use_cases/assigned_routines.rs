use async_trait::async_trait;
use uuid::Uuid;

use super::coaching_error::CoachingError;
use crate::auth::application::domain::entities::UserId;
use crate::program::application::ports::incoming::use_cases::RoutineView;

/// Active routines any of the client's instructors assigned, newest first.
#[async_trait]
pub trait ListAssignedRoutinesUseCase: Send + Sync {
    async fn execute(&self, client: UserId) -> Result<Vec<RoutineView>, CoachingError>;
}

/// `RoutineNotFound` unless the routine is active and assigned to the client.
#[async_trait]
pub trait GetAssignedRoutineUseCase: Send + Sync {
    async fn execute(&self, client: UserId, routine_id: Uuid) -> Result<RoutineView, CoachingError>;
}
