use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::shared::labeled_enum;

pub const MAX_NAME_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be at most {} characters", MAX_NAME_LEN)]
    NameTooLong,

    #[error("{0} must be at least 1")]
    MustBePositive(&'static str),
}

/// Trimmed, non-empty, at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<String, ProgramValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProgramValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ProgramValidationError::NameTooLong);
    }
    Ok(name.to_string())
}

fn positive(value: u32, field: &'static str) -> Result<u32, ProgramValidationError> {
    if value == 0 {
        return Err(ProgramValidationError::MustBePositive(field));
    }
    Ok(value)
}

labeled_enum! {
    pub enum Difficulty ("difficulty") {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

labeled_enum! {
    pub enum PatternType ("pattern type") {
        Equal => "equal",
        BoxBreathing => "box",
        FourSevenEight => "478",
        Custom => "custom",
    }
}

labeled_enum! {
    pub enum CueStyle ("cue style") {
        Minimal => "minimal",
        Guided => "guided",
        Nature => "nature",
    }
}

labeled_enum! {
    pub enum SessionType ("session type") {
        Mindfulness => "mindfulness",
        LovingKindness => "loving_kindness",
        BodyScan => "body_scan",
        BreathFocus => "breath_focus",
        Custom => "custom",
    }
}

labeled_enum! {
    pub enum AmbientSoundType ("ambient sound type") {
        Nature => "nature",
        Music => "music",
        Silence => "silence",
        Custom => "custom",
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Beginner
    }
}

impl Default for PatternType {
    fn default() -> Self {
        PatternType::Equal
    }
}

impl Default for CueStyle {
    fn default() -> Self {
        CueStyle::Minimal
    }
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Mindfulness
    }
}

impl Default for AmbientSoundType {
    fn default() -> Self {
        AmbientSoundType::Nature
    }
}

// Routine

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub instructions: String,
    pub media_asset_ids: Vec<Uuid>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub instructions: String,
    pub media_asset_ids: Vec<Uuid>,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: Uuid,
    pub instructor_id: UserId,
    pub name: String,
    pub description: String,
    /// Sorted by `order`.
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Routine {
    /// Exercises without an explicit `order` take their position in the list.
    pub fn new(
        instructor_id: UserId,
        name: &str,
        description: String,
        exercises: Vec<NewExercise>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProgramValidationError> {
        let mut exercises = exercises
            .into_iter()
            .enumerate()
            .map(|(position, ex)| {
                Ok(Exercise {
                    id: Uuid::new_v4(),
                    name: validate_name(&ex.name)?,
                    instructions: ex.instructions,
                    media_asset_ids: ex.media_asset_ids,
                    order: ex.order.unwrap_or(position as u32),
                })
            })
            .collect::<Result<Vec<_>, ProgramValidationError>>()?;
        exercises.sort_by_key(|ex| ex.order);

        Ok(Self {
            id: Uuid::new_v4(),
            instructor_id,
            name: validate_name(name)?,
            description,
            exercises,
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    /// `None` keeps the current value.
    pub fn revise(
        &mut self,
        name: Option<&str>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ProgramValidationError> {
        if let Some(name) = name {
            self.name = validate_name(name)?;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Without an explicit `order` the exercise goes after the current last one.
    pub fn add_exercise(
        &mut self,
        exercise: NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Uuid, ProgramValidationError> {
        let next = self.exercises.iter().map(|ex| ex.order + 1).max().unwrap_or(0);
        let added = Exercise {
            id: Uuid::new_v4(),
            name: validate_name(&exercise.name)?,
            instructions: exercise.instructions,
            media_asset_ids: exercise.media_asset_ids,
            order: exercise.order.unwrap_or(next),
        };
        let id = added.id;

        self.exercises.push(added);
        self.exercises.sort_by_key(|ex| ex.order);
        self.updated_at = now;
        Ok(id)
    }

    /// Returns `false` when the routine has no such exercise.
    pub fn remove_exercise(&mut self, exercise_id: Uuid, now: DateTime<Utc>) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|ex| ex.id != exercise_id);
        if self.exercises.len() == before {
            return false;
        }
        self.updated_at = now;
        true
    }
}

// Breathing exercise

/// Timing of one breath cycle, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathPattern {
    pub inhale_seconds: u32,
    pub hold_seconds: u32,
    pub exhale_seconds: u32,
    pub cycles: u32,
}

impl Default for BreathPattern {
    fn default() -> Self {
        Self {
            inhale_seconds: 4,
            hold_seconds: 0,
            exhale_seconds: 4,
            cycles: 1,
        }
    }
}

impl BreathPattern {
    pub fn validate(self) -> Result<Self, ProgramValidationError> {
        positive(self.inhale_seconds, "inhale_seconds")?;
        positive(self.exhale_seconds, "exhale_seconds")?;
        positive(self.cycles, "cycles")?;
        Ok(self)
    }

    pub fn total_duration_seconds(&self) -> u64 {
        (self.inhale_seconds as u64 + self.hold_seconds as u64 + self.exhale_seconds as u64)
            * self.cycles as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreathingExercise {
    pub id: Uuid,
    pub instructor_id: UserId,
    pub name: String,
    pub description: String,
    pub media_asset_ids: Vec<Uuid>,
    pub pattern: BreathPattern,
    pub pattern_type: PatternType,
    pub has_visual_cue: bool,
    pub has_audio_cue: bool,
    pub cue_style: CueStyle,
    pub difficulty: Difficulty,
    pub mastery_criteria: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl BreathingExercise {
    pub fn total_duration_seconds(&self) -> u64 {
        self.pattern.total_duration_seconds()
    }
}

// Meditation session

#[derive(Debug, Clone, PartialEq)]
pub struct MeditationSession {
    pub id: Uuid,
    pub instructor_id: UserId,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub session_type: SessionType,
    pub guided_script: String,
    pub focus_points: Vec<String>,
    pub background_audio_id: Option<Uuid>,
    pub guided_audio_id: Option<Uuid>,
    pub has_visual_guide: bool,
    pub has_ambient_sounds: bool,
    pub ambient_sound_type: AmbientSoundType,
    pub difficulty: Difficulty,
    pub focus_level_assessment: Map<String, Value>,
    pub achievement_criteria: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl MeditationSession {
    pub fn validate_duration(minutes: u32) -> Result<u32, ProgramValidationError> {
        positive(minutes, "duration_minutes")
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_minutes as u64 * 60
    }
}

// Combined routine

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRoutine {
    pub id: Uuid,
    pub instructor_id: UserId,
    pub name: String,
    pub description: String,
    pub routine_ids: Vec<Uuid>,
    pub breathing_exercise_ids: Vec<Uuid>,
    pub meditation_session_ids: Vec<Uuid>,
    pub transition_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Order-preserving de-duplication for id lists.
pub fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
