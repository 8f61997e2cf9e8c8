use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::achievements::ClientAchievementView;
use super::coaching_error::CoachingError;
use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::ExerciseProgress;

/// Exactly one of the three target ids must be set.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordProgressRequest {
    #[serde(default)]
    pub exercise_id: Option<Uuid>,
    #[serde(default)]
    pub breathing_exercise_id: Option<Uuid>,
    #[serde(default)]
    pub meditation_session_id: Option<Uuid>,
    #[schema(example = 300)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub notes: String,
    /// 1 (easy) to 5 (hard).
    #[serde(default)]
    pub difficulty_rating: Option<u8>,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProgressView {
    pub id: Uuid,
    pub exercise_id: Option<Uuid>,
    pub breathing_exercise_id: Option<Uuid>,
    pub meditation_session_id: Option<Uuid>,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u32,
    pub notes: String,
    pub difficulty_rating: Option<u8>,
    pub feedback: String,
}

impl From<&ExerciseProgress> for ProgressView {
    fn from(p: &ExerciseProgress) -> Self {
        Self {
            id: p.id,
            exercise_id: p.target.exercise_id(),
            breathing_exercise_id: p.target.breathing_exercise_id(),
            meditation_session_id: p.target.meditation_session_id(),
            completed_at: p.completed_at,
            duration_seconds: p.duration_seconds,
            notes: p.notes.clone(),
            difficulty_rating: p.difficulty_rating,
            feedback: p.feedback.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecordProgressResponse {
    pub progress: ProgressView,
    /// Achievements earned by this entry.
    pub new_achievements: Vec<ClientAchievementView>,
}

#[async_trait]
pub trait RecordProgressUseCase: Send + Sync {
    async fn execute(
        &self,
        client: UserId,
        request: RecordProgressRequest,
    ) -> Result<RecordProgressResponse, CoachingError>;
}

#[async_trait]
pub trait ListProgressUseCase: Send + Sync {
    async fn execute(&self, client: UserId) -> Result<Vec<ProgressView>, CoachingError>;
}
