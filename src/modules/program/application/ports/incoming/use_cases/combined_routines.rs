use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::program_error::ProgramError;
use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::CombinedRoutine;

/// Every referenced id must be one of the instructor's active programs.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCombinedRoutineRequest {
    #[schema(example = "Full reset")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub routine_ids: Vec<Uuid>,
    #[serde(default)]
    pub breathing_exercise_ids: Vec<Uuid>,
    #[serde(default)]
    pub meditation_session_ids: Vec<Uuid>,
    #[serde(default)]
    pub transition_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CombinedRoutineView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub routine_ids: Vec<Uuid>,
    pub breathing_exercise_ids: Vec<Uuid>,
    pub meditation_session_ids: Vec<Uuid>,
    pub transition_notes: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&CombinedRoutine> for CombinedRoutineView {
    fn from(c: &CombinedRoutine) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            routine_ids: c.routine_ids.clone(),
            breathing_exercise_ids: c.breathing_exercise_ids.clone(),
            meditation_session_ids: c.meditation_session_ids.clone(),
            transition_notes: c.transition_notes.clone(),
            created_at: c.created_at,
            is_active: c.is_active,
        }
    }
}

#[async_trait]
pub trait CreateCombinedRoutineUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateCombinedRoutineRequest,
    ) -> Result<CombinedRoutineView, ProgramError>;
}

#[async_trait]
pub trait ListCombinedRoutinesUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId)
        -> Result<Vec<CombinedRoutineView>, ProgramError>;
}
