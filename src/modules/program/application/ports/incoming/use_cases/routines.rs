use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::program_error::ProgramError;
use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{Exercise, NewExercise, Routine};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExerciseInput {
    #[schema(example = "Cat-cow")]
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub media_asset_ids: Vec<Uuid>,
    /// Defaults to the position in the list.
    #[serde(default)]
    pub order: Option<u32>,
}

impl From<ExerciseInput> for NewExercise {
    fn from(input: ExerciseInput) -> Self {
        NewExercise {
            name: input.name,
            instructions: input.instructions,
            media_asset_ids: input.media_asset_ids,
            order: input.order,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRoutineRequest {
    #[schema(example = "Morning mobility")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

/// Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRoutineRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExerciseView {
    pub id: Uuid,
    pub name: String,
    pub instructions: String,
    pub media_asset_ids: Vec<Uuid>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RoutineView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub exercises: Vec<ExerciseView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&Exercise> for ExerciseView {
    fn from(ex: &Exercise) -> Self {
        Self {
            id: ex.id,
            name: ex.name.clone(),
            instructions: ex.instructions.clone(),
            media_asset_ids: ex.media_asset_ids.clone(),
            order: ex.order,
        }
    }
}

impl From<&Routine> for RoutineView {
    fn from(routine: &Routine) -> Self {
        Self {
            id: routine.id,
            name: routine.name.clone(),
            description: routine.description.clone(),
            exercises: routine.exercises.iter().map(ExerciseView::from).collect(),
            created_at: routine.created_at,
            updated_at: routine.updated_at,
            is_active: routine.is_active,
        }
    }
}

#[async_trait]
pub trait CreateRoutineUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateRoutineRequest,
    ) -> Result<RoutineView, ProgramError>;
}

#[async_trait]
pub trait ListRoutinesUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId) -> Result<Vec<RoutineView>, ProgramError>;
}

#[async_trait]
pub trait GetRoutineUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId, routine_id: Uuid)
        -> Result<RoutineView, ProgramError>;
}

#[async_trait]
pub trait UpdateRoutineUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        request: UpdateRoutineRequest,
    ) -> Result<RoutineView, ProgramError>;
}

#[async_trait]
pub trait AddRoutineExerciseUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        exercise: ExerciseInput,
    ) -> Result<RoutineView, ProgramError>;
}

#[async_trait]
pub trait RemoveRoutineExerciseUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<(), ProgramError>;
}

#[async_trait]
pub trait DeactivateRoutineUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId, routine_id: Uuid)
        -> Result<RoutineView, ProgramError>;
}
