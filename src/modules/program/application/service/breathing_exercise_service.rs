use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{validate_name, BreathPattern, BreathingExercise};
use crate::program::application::ports::incoming::use_cases::{
    BreathingExerciseView, CreateBreathingExerciseRequest, CreateBreathingExerciseUseCase,
    ListBreathingExercisesUseCase, ProgramError,
};
use crate::program::application::ports::outgoing::BreathingExerciseRepository;

#[derive(Clone)]
pub struct BreathingExerciseService<R: BreathingExerciseRepository> {
    repository: R,
}

impl<R: BreathingExerciseRepository> BreathingExerciseService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateBreathingExerciseUseCase for BreathingExerciseService<R>
where
    R: BreathingExerciseRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateBreathingExerciseRequest,
    ) -> Result<BreathingExerciseView, ProgramError> {
        let pattern = BreathPattern {
            inhale_seconds: request.inhale_seconds,
            hold_seconds: request.hold_seconds,
            exhale_seconds: request.exhale_seconds,
            cycles: request.cycles,
        }
        .validate()?;

        let now = Utc::now();
        let exercise = BreathingExercise {
            id: Uuid::new_v4(),
            instructor_id: instructor,
            name: validate_name(&request.name)?,
            description: request.description,
            media_asset_ids: request.media_asset_ids,
            pattern,
            pattern_type: request.pattern_type,
            has_visual_cue: request.has_visual_cue,
            has_audio_cue: request.has_audio_cue,
            cue_style: request.cue_style,
            difficulty: request.difficulty,
            mastery_criteria: request.mastery_criteria,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let saved = self.repository.create_breathing_exercise(&exercise).await?;
        tracing::info!(
            exercise_id = %saved.id,
            user_id = %instructor,
            pattern_type = %saved.pattern_type,
            "Breathing exercise created"
        );
        Ok(BreathingExerciseView::from(&saved))
    }
}

#[async_trait]
impl<R> ListBreathingExercisesUseCase for BreathingExerciseService<R>
where
    R: BreathingExerciseRepository + Send + Sync,
{
    async fn execute(
        &self,
        instructor: UserId,
    ) -> Result<Vec<BreathingExerciseView>, ProgramError> {
        let exercises = self.repository.list_breathing_exercises(instructor).await?;
        Ok(exercises.iter().map(BreathingExerciseView::from).collect())
    }
}
