use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{NewExercise, Routine};
use crate::program::application::ports::incoming::use_cases::{
    AddRoutineExerciseUseCase, CreateRoutineRequest, CreateRoutineUseCase,
    DeactivateRoutineUseCase, ExerciseInput, GetRoutineUseCase, ListRoutinesUseCase, ProgramError,
    RemoveRoutineExerciseUseCase, RoutineView, UpdateRoutineRequest, UpdateRoutineUseCase,
};
use crate::program::application::ports::outgoing::RoutineRepository;

#[derive(Clone)]
pub struct RoutineService<R: RoutineRepository> {
    repository: R,
}

impl<R: RoutineRepository> RoutineService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateRoutineUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateRoutineRequest,
    ) -> Result<RoutineView, ProgramError> {
        let routine = Routine::new(
            instructor,
            &request.name,
            request.description,
            request.exercises.into_iter().map(NewExercise::from).collect(),
            Utc::now(),
        )?;

        let saved = self.repository.create_routine(&routine).await?;
        tracing::info!(
            routine_id = %saved.id,
            user_id = %instructor,
            exercises = saved.exercises.len(),
            "Routine created"
        );
        Ok(RoutineView::from(&saved))
    }
}

#[async_trait]
impl<R> ListRoutinesUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(&self, instructor: UserId) -> Result<Vec<RoutineView>, ProgramError> {
        let routines = self.repository.list_routines(instructor).await?;
        Ok(routines.iter().map(RoutineView::from).collect())
    }
}

#[async_trait]
impl<R> GetRoutineUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(&self, instructor: UserId, routine_id: Uuid) -> Result<RoutineView, ProgramError> {
        let routine = self.repository.find_routine(instructor, routine_id).await?;
        Ok(RoutineView::from(&routine))
    }
}

#[async_trait]
impl<R> UpdateRoutineUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        request: UpdateRoutineRequest,
    ) -> Result<RoutineView, ProgramError> {
        let mut routine = self.repository.find_routine(instructor, routine_id).await?;
        routine.revise(request.name.as_deref(), request.description, Utc::now())?;

        let saved = self.repository.update_routine(&routine).await?;
        tracing::info!(routine_id = %routine_id, user_id = %instructor, "Routine updated");
        Ok(RoutineView::from(&saved))
    }
}

#[async_trait]
impl<R> AddRoutineExerciseUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        exercise: ExerciseInput,
    ) -> Result<RoutineView, ProgramError> {
        let mut routine = self.repository.find_routine(instructor, routine_id).await?;
        let exercise_id = routine.add_exercise(NewExercise::from(exercise), Utc::now())?;

        let saved = self.repository.update_routine(&routine).await?;
        tracing::info!(%routine_id, %exercise_id, user_id = %instructor, "Exercise added to routine");
        Ok(RoutineView::from(&saved))
    }
}

#[async_trait]
impl<R> RemoveRoutineExerciseUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        routine_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<(), ProgramError> {
        let mut routine = self.repository.find_routine(instructor, routine_id).await?;
        if !routine.remove_exercise(exercise_id, Utc::now()) {
            return Err(ProgramError::ExerciseNotFound);
        }

        self.repository.update_routine(&routine).await?;
        tracing::info!(%routine_id, %exercise_id, user_id = %instructor, "Exercise removed from routine");
        Ok(())
    }
}

#[async_trait]
impl<R> DeactivateRoutineUseCase for RoutineService<R>
where
    R: RoutineRepository + Send + Sync,
{
    async fn execute(&self, instructor: UserId, routine_id: Uuid) -> Result<RoutineView, ProgramError> {
        let routine = self
            .repository
            .deactivate_routine(instructor, routine_id)
            .await?;
        tracing::info!(routine_id = %routine_id, user_id = %instructor, "Routine deactivated");
        Ok(RoutineView::from(&routine))
    }
}
