use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::program_error::ProgramError;
use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{BreathingExercise, CueStyle, Difficulty, PatternType};

fn default_true() -> bool {
    true
}

fn default_inhale() -> u32 {
    4
}

fn default_exhale() -> u32 {
    4
}

fn default_cycles() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBreathingExerciseRequest {
    #[schema(example = "Box breathing")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_asset_ids: Vec<Uuid>,
    #[serde(default = "default_inhale")]
    pub inhale_seconds: u32,
    #[serde(default)]
    pub hold_seconds: u32,
    #[serde(default = "default_exhale")]
    pub exhale_seconds: u32,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    #[serde(default)]
    pub pattern_type: PatternType,
    #[serde(default = "default_true")]
    pub has_visual_cue: bool,
    #[serde(default = "default_true")]
    pub has_audio_cue: bool,
    #[serde(default)]
    pub cue_style: CueStyle,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub mastery_criteria: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BreathingExerciseView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub media_asset_ids: Vec<Uuid>,
    pub inhale_seconds: u32,
    pub hold_seconds: u32,
    pub exhale_seconds: u32,
    pub cycles: u32,
    pub total_duration_seconds: u64,
    pub pattern_type: PatternType,
    pub has_visual_cue: bool,
    pub has_audio_cue: bool,
    pub cue_style: CueStyle,
    pub difficulty: Difficulty,
    #[schema(value_type = Object)]
    pub mastery_criteria: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&BreathingExercise> for BreathingExerciseView {
    fn from(ex: &BreathingExercise) -> Self {
        Self {
            id: ex.id,
            name: ex.name.clone(),
            description: ex.description.clone(),
            media_asset_ids: ex.media_asset_ids.clone(),
            inhale_seconds: ex.pattern.inhale_seconds,
            hold_seconds: ex.pattern.hold_seconds,
            exhale_seconds: ex.pattern.exhale_seconds,
            cycles: ex.pattern.cycles,
            total_duration_seconds: ex.total_duration_seconds(),
            pattern_type: ex.pattern_type,
            has_visual_cue: ex.has_visual_cue,
            has_audio_cue: ex.has_audio_cue,
            cue_style: ex.cue_style,
            difficulty: ex.difficulty,
            mastery_criteria: ex.mastery_criteria.clone(),
            created_at: ex.created_at,
            is_active: ex.is_active,
        }
    }
}

#[async_trait]
pub trait CreateBreathingExerciseUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateBreathingExerciseRequest,
    ) -> Result<BreathingExerciseView, ProgramError>;
}

#[async_trait]
pub trait ListBreathingExercisesUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId)
        -> Result<Vec<BreathingExerciseView>, ProgramError>;
}
