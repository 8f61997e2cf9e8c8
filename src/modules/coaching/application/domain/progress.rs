use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;

pub const MIN_DIFFICULTY_RATING: u8 = 1;
pub const MAX_DIFFICULTY_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressValidationError {
    #[error("Exactly one of exercise_id, breathing_exercise_id or meditation_session_id is required")]
    TargetCount,

    #[error("Difficulty rating must be between {} and {}", MIN_DIFFICULTY_RATING, MAX_DIFFICULTY_RATING)]
    DifficultyRating,
}

/// What a progress entry was recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTarget {
    Exercise(Uuid),
    BreathingExercise(Uuid),
    MeditationSession(Uuid),
}

impl ProgressTarget {
    pub fn from_parts(
        exercise_id: Option<Uuid>,
        breathing_exercise_id: Option<Uuid>,
        meditation_session_id: Option<Uuid>,
    ) -> Result<Self, ProgressValidationError> {
        match (exercise_id, breathing_exercise_id, meditation_session_id) {
            (Some(id), None, None) => Ok(ProgressTarget::Exercise(id)),
            (None, Some(id), None) => Ok(ProgressTarget::BreathingExercise(id)),
            (None, None, Some(id)) => Ok(ProgressTarget::MeditationSession(id)),
            _ => Err(ProgressValidationError::TargetCount),
        }
    }

    pub fn exercise_id(&self) -> Option<Uuid> {
        match self {
            ProgressTarget::Exercise(id) => Some(*id),
            _ => None,
        }
    }

    pub fn breathing_exercise_id(&self) -> Option<Uuid> {
        match self {
            ProgressTarget::BreathingExercise(id) => Some(*id),
            _ => None,
        }
    }

    pub fn meditation_session_id(&self) -> Option<Uuid> {
        match self {
            ProgressTarget::MeditationSession(id) => Some(*id),
            _ => None,
        }
    }
}

pub fn validate_difficulty_rating(rating: Option<u8>) -> Result<Option<u8>, ProgressValidationError> {
    match rating {
        Some(r) if !(MIN_DIFFICULTY_RATING..=MAX_DIFFICULTY_RATING).contains(&r) => {
            Err(ProgressValidationError::DifficultyRating)
        }
        other => Ok(other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub id: Uuid,
    pub client_id: UserId,
    pub target: ProgressTarget,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u32,
    pub notes: String,
    pub difficulty_rating: Option<u8>,
    pub feedback: String,
}

/// Aggregate view of a client's history used to evaluate achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStats {
    pub exercise_count: u64,
    pub days_streak: u32,
}

impl ProgressStats {
    /// The streak is the run of consecutive UTC dates ending on the most
    /// recent completion date.
    pub fn from_completions(completions: &[DateTime<Utc>]) -> Self {
        let dates: BTreeSet<NaiveDate> = completions.iter().map(|c| c.date_naive()).collect();

        let mut days_streak = 0;
        let mut expected = dates.iter().next_back().copied();
        for date in dates.iter().rev() {
            if Some(*date) != expected {
                break;
            }
            days_streak += 1;
            expected = date.pred_opt();
        }

        Self {
            exercise_count: completions.len() as u64,
            days_streak,
        }
    }
}
