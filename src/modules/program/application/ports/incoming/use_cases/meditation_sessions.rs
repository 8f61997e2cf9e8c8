use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::program_error::ProgramError;
use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{
    AmbientSoundType, Difficulty, MeditationSession, SessionType,
};

fn default_true() -> bool {
    true
}

fn default_duration() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMeditationSessionRequest {
    #[schema(example = "Evening body scan")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub guided_script: String,
    #[serde(default)]
    pub focus_points: Vec<String>,
    #[serde(default)]
    pub background_audio_id: Option<Uuid>,
    #[serde(default)]
    pub guided_audio_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub has_visual_guide: bool,
    #[serde(default = "default_true")]
    pub has_ambient_sounds: bool,
    #[serde(default)]
    pub ambient_sound_type: AmbientSoundType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub focus_level_assessment: Map<String, Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub achievement_criteria: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MeditationSessionView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub duration_seconds: u64,
    pub session_type: SessionType,
    pub guided_script: String,
    pub focus_points: Vec<String>,
    pub background_audio_id: Option<Uuid>,
    pub guided_audio_id: Option<Uuid>,
    pub has_visual_guide: bool,
    pub has_ambient_sounds: bool,
    pub ambient_sound_type: AmbientSoundType,
    pub difficulty: Difficulty,
    #[schema(value_type = Object)]
    pub focus_level_assessment: Map<String, Value>,
    #[schema(value_type = Object)]
    pub achievement_criteria: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&MeditationSession> for MeditationSessionView {
    fn from(s: &MeditationSession) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            description: s.description.clone(),
            duration_minutes: s.duration_minutes,
            duration_seconds: s.duration_seconds(),
            session_type: s.session_type,
            guided_script: s.guided_script.clone(),
            focus_points: s.focus_points.clone(),
            background_audio_id: s.background_audio_id,
            guided_audio_id: s.guided_audio_id,
            has_visual_guide: s.has_visual_guide,
            has_ambient_sounds: s.has_ambient_sounds,
            ambient_sound_type: s.ambient_sound_type,
            difficulty: s.difficulty,
            focus_level_assessment: s.focus_level_assessment.clone(),
            achievement_criteria: s.achievement_criteria.clone(),
            created_at: s.created_at,
            is_active: s.is_active,
        }
    }
}

#[async_trait]
pub trait CreateMeditationSessionUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateMeditationSessionRequest,
    ) -> Result<MeditationSessionView, ProgramError>;
}

#[async_trait]
pub trait ListMeditationSessionsUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId)
        -> Result<Vec<MeditationSessionView>, ProgramError>;
}
