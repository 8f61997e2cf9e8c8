use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::achievement_evaluator::AchievementEvaluator;
use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{
    validate_difficulty_rating, ExerciseProgress, ProgressTarget,
};
use crate::coaching::application::ports::incoming::use_cases::{
    ClientAchievementView, CoachingError, ListProgressUseCase, ProgressView,
    RecordProgressRequest, RecordProgressResponse, RecordProgressUseCase,
};
use crate::coaching::application::ports::outgoing::ProgressRepository;

#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
    evaluator: AchievementEvaluator,
}

impl ProgressService {
    pub fn new(progress: Arc<dyn ProgressRepository>, evaluator: AchievementEvaluator) -> Self {
        Self { progress, evaluator }
    }
}

#[async_trait]
impl RecordProgressUseCase for ProgressService {
    async fn execute(
        &self,
        client: UserId,
        request: RecordProgressRequest,
    ) -> Result<RecordProgressResponse, CoachingError> {
        let target = ProgressTarget::from_parts(
            request.exercise_id,
            request.breathing_exercise_id,
            request.meditation_session_id,
        )?;
        let difficulty_rating = validate_difficulty_rating(request.difficulty_rating)?;

        let entry = ExerciseProgress {
            id: Uuid::new_v4(),
            client_id: client,
            target,
            completed_at: Utc::now(),
            duration_seconds: request.duration_seconds,
            notes: request.notes,
            difficulty_rating,
            feedback: request.feedback,
        };

        let saved = self.progress.record_progress(&entry).await?;
        tracing::info!(progress_id = %saved.id, user_id = %client, "Progress recorded");

        let new_achievements = match self.evaluator.evaluate(client).await {
            Ok(earned) => earned.iter().map(ClientAchievementView::from).collect(),
            Err(e) => {
                tracing::warn!(user_id = %client, error = %e, "Achievement evaluation failed");
                Vec::new()
            }
        };

        Ok(RecordProgressResponse {
            progress: ProgressView::from(&saved),
            new_achievements,
        })
    }
}

#[async_trait]
impl ListProgressUseCase for ProgressService {
    async fn execute(&self, client: UserId) -> Result<Vec<ProgressView>, CoachingError> {
        let entries = self.progress.list_progress(client).await?;
        Ok(entries.iter().map(ProgressView::from).collect())
    }
}
