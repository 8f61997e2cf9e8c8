use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{breathing_exercises, combined_routines, meditation_sessions, routines};
use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{
    BreathPattern, BreathingExercise, CombinedRoutine, Exercise, MeditationSession, Routine,
};
use crate::program::application::ports::outgoing::{
    BreathingExerciseRepository, CombinedRoutineRepository, MeditationSessionRepository,
    ProgramRepositoryError, RoutineRepository,
};

/// One connection serves all four program tables.
#[derive(Clone)]
pub struct ProgramRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProgramRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

// Routines

#[async_trait]
impl RoutineRepository for ProgramRepositoryPostgres {
    async fn create_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError> {
        let model = routines::ActiveModel {
            id: Set(routine.id),
            instructor_id: Set(routine.instructor_id.into()),
            name: Set(routine.name.clone()),
            description: Set(routine.description.clone()),
            exercises: Set(exercises_to_json(&routine.exercises)?),
            created_at: Set(routine.created_at.fixed_offset()),
            updated_at: Set(routine.updated_at.fixed_offset()),
            is_active: Set(routine.is_active),
        };

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;
        model_to_routine(saved)
    }

    async fn list_routines(&self, instructor: UserId) -> Result<Vec<Routine>, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        routines::Entity::find()
            .filter(routines::Column::InstructorId.eq(instructor_uuid))
            .filter(routines::Column::IsActive.eq(true))
            .order_by_desc(routines::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_routine)
            .collect()
    }

    async fn find_routine(
        &self,
        instructor: UserId,
        routine_id: Uuid,
    ) -> Result<Routine, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        let model = routines::Entity::find_by_id(routine_id)
            .filter(routines::Column::InstructorId.eq(instructor_uuid))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ProgramRepositoryError::NotFound)?;

        model_to_routine(model)
    }

    async fn deactivate_routine(
        &self,
        instructor: UserId,
        routine_id: Uuid,
    ) -> Result<Routine, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        let model = routines::ActiveModel {
            is_active: Set(false),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let res = routines::Entity::update_many()
            .set(model)
            .filter(routines::Column::Id.eq(routine_id))
            .filter(routines::Column::InstructorId.eq(instructor_uuid))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(ProgramRepositoryError::NotFound);
        }
        self.find_routine(instructor, routine_id).await
    }

    async fn update_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError> {
        let instructor_uuid: Uuid = routine.instructor_id.into();

        let model = routines::ActiveModel {
            name: Set(routine.name.clone()),
            description: Set(routine.description.clone()),
            exercises: Set(exercises_to_json(&routine.exercises)?),
            updated_at: Set(routine.updated_at.fixed_offset()),
            ..Default::default()
        };

        let res = routines::Entity::update_many()
            .set(model)
            .filter(routines::Column::Id.eq(routine.id))
            .filter(routines::Column::InstructorId.eq(instructor_uuid))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(ProgramRepositoryError::NotFound);
        }
        self.find_routine(routine.instructor_id, routine.id).await
    }

    async fn find_active_routines(&self, ids: &[Uuid]) -> Result<Vec<Routine>, ProgramRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        routines::Entity::find()
            .filter(routines::Column::Id.is_in(ids.iter().copied()))
            .filter(routines::Column::IsActive.eq(true))
            .order_by_desc(routines::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_routine)
            .collect()
    }
}

// Breathing exercises

#[async_trait]
impl BreathingExerciseRepository for ProgramRepositoryPostgres {
    async fn create_breathing_exercise(
        &self,
        exercise: &BreathingExercise,
    ) -> Result<BreathingExercise, ProgramRepositoryError> {
        let model = breathing_exercises::ActiveModel {
            id: Set(exercise.id),
            instructor_id: Set(exercise.instructor_id.into()),
            name: Set(exercise.name.clone()),
            description: Set(exercise.description.clone()),
            media_asset_ids: Set(ids_to_json(&exercise.media_asset_ids)),
            inhale_seconds: Set(to_i32(exercise.pattern.inhale_seconds)),
            hold_seconds: Set(to_i32(exercise.pattern.hold_seconds)),
            exhale_seconds: Set(to_i32(exercise.pattern.exhale_seconds)),
            cycles: Set(to_i32(exercise.pattern.cycles)),
            pattern_type: Set(exercise.pattern_type.as_str().to_string()),
            has_visual_cue: Set(exercise.has_visual_cue),
            has_audio_cue: Set(exercise.has_audio_cue),
            cue_style: Set(exercise.cue_style.as_str().to_string()),
            difficulty: Set(exercise.difficulty.as_str().to_string()),
            mastery_criteria: Set(Value::Object(exercise.mastery_criteria.clone())),
            created_at: Set(exercise.created_at.fixed_offset()),
            updated_at: Set(exercise.updated_at.fixed_offset()),
            is_active: Set(exercise.is_active),
        };

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;
        model_to_breathing(saved)
    }

    async fn list_breathing_exercises(
        &self,
        instructor: UserId,
    ) -> Result<Vec<BreathingExercise>, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        breathing_exercises::Entity::find()
            .filter(breathing_exercises::Column::InstructorId.eq(instructor_uuid))
            .filter(breathing_exercises::Column::IsActive.eq(true))
            .order_by_desc(breathing_exercises::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_breathing)
            .collect()
    }
}

// Meditation sessions

#[async_trait]
impl MeditationSessionRepository for ProgramRepositoryPostgres {
    async fn create_meditation_session(
        &self,
        session: &MeditationSession,
    ) -> Result<MeditationSession, ProgramRepositoryError> {
        let model = meditation_sessions::ActiveModel {
            id: Set(session.id),
            instructor_id: Set(session.instructor_id.into()),
            name: Set(session.name.clone()),
            description: Set(session.description.clone()),
            duration_minutes: Set(to_i32(session.duration_minutes)),
            session_type: Set(session.session_type.as_str().to_string()),
            guided_script: Set(session.guided_script.clone()),
            focus_points: Set(Value::from(session.focus_points.clone())),
            background_audio_id: Set(session.background_audio_id),
            guided_audio_id: Set(session.guided_audio_id),
            has_visual_guide: Set(session.has_visual_guide),
            has_ambient_sounds: Set(session.has_ambient_sounds),
            ambient_sound_type: Set(session.ambient_sound_type.as_str().to_string()),
            difficulty: Set(session.difficulty.as_str().to_string()),
            focus_level_assessment: Set(Value::Object(session.focus_level_assessment.clone())),
            achievement_criteria: Set(Value::Object(session.achievement_criteria.clone())),
            created_at: Set(session.created_at.fixed_offset()),
            updated_at: Set(session.updated_at.fixed_offset()),
            is_active: Set(session.is_active),
        };

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;
        model_to_meditation(saved)
    }

    async fn list_meditation_sessions(
        &self,
        instructor: UserId,
    ) -> Result<Vec<MeditationSession>, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        meditation_sessions::Entity::find()
            .filter(meditation_sessions::Column::InstructorId.eq(instructor_uuid))
            .filter(meditation_sessions::Column::IsActive.eq(true))
            .order_by_desc(meditation_sessions::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_meditation)
            .collect()
    }
}

// Combined routines

#[async_trait]
impl CombinedRoutineRepository for ProgramRepositoryPostgres {
    async fn create_combined_routine(
        &self,
        combined: &CombinedRoutine,
    ) -> Result<CombinedRoutine, ProgramRepositoryError> {
        let model = combined_routines::ActiveModel {
            id: Set(combined.id),
            instructor_id: Set(combined.instructor_id.into()),
            name: Set(combined.name.clone()),
            description: Set(combined.description.clone()),
            routine_ids: Set(ids_to_json(&combined.routine_ids)),
            breathing_exercise_ids: Set(ids_to_json(&combined.breathing_exercise_ids)),
            meditation_session_ids: Set(ids_to_json(&combined.meditation_session_ids)),
            transition_notes: Set(combined.transition_notes.clone()),
            created_at: Set(combined.created_at.fixed_offset()),
            updated_at: Set(combined.updated_at.fixed_offset()),
            is_active: Set(combined.is_active),
        };

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;
        model_to_combined(saved)
    }

    async fn list_combined_routines(
        &self,
        instructor: UserId,
    ) -> Result<Vec<CombinedRoutine>, ProgramRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        combined_routines::Entity::find()
            .filter(combined_routines::Column::InstructorId.eq(instructor_uuid))
            .filter(combined_routines::Column::IsActive.eq(true))
            .order_by_desc(combined_routines::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_combined)
            .collect()
    }
}

// Helper Functions

#[derive(Serialize, Deserialize)]
struct StoredExercise {
    id: Uuid,
    name: String,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    media_asset_ids: Vec<Uuid>,
    order: u32,
}

fn exercises_to_json(exercises: &[Exercise]) -> Result<Value, ProgramRepositoryError> {
    let stored: Vec<StoredExercise> = exercises
        .iter()
        .map(|ex| StoredExercise {
            id: ex.id,
            name: ex.name.clone(),
            instructions: ex.instructions.clone(),
            media_asset_ids: ex.media_asset_ids.clone(),
            order: ex.order,
        })
        .collect();
    serde_json::to_value(stored).map_err(corrupt)
}

fn exercises_from_json(value: Value) -> Result<Vec<Exercise>, ProgramRepositoryError> {
    let stored: Vec<StoredExercise> = serde_json::from_value(value).map_err(corrupt)?;
    let mut exercises: Vec<Exercise> = stored
        .into_iter()
        .map(|s| Exercise {
            id: s.id,
            name: s.name,
            instructions: s.instructions,
            media_asset_ids: s.media_asset_ids,
            order: s.order,
        })
        .collect();
    exercises.sort_by_key(|ex| ex.order);
    Ok(exercises)
}

fn ids_to_json(ids: &[Uuid]) -> Value {
    Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
}

fn ids_from_json(value: Value) -> Result<Vec<Uuid>, ProgramRepositoryError> {
    serde_json::from_value(value).map_err(corrupt)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn to_u32(value: i32) -> u32 {
    value.max(0) as u32
}

fn label<T: std::str::FromStr>(raw: &str) -> Result<T, ProgramRepositoryError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(corrupt)
}

fn model_to_routine(model: routines::Model) -> Result<Routine, ProgramRepositoryError> {
    Ok(Routine {
        id: model.id,
        instructor_id: UserId::from(model.instructor_id),
        name: model.name,
        description: model.description,
        exercises: exercises_from_json(model.exercises)?,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        is_active: model.is_active,
    })
}

fn model_to_breathing(
    model: breathing_exercises::Model,
) -> Result<BreathingExercise, ProgramRepositoryError> {
    Ok(BreathingExercise {
        id: model.id,
        instructor_id: UserId::from(model.instructor_id),
        name: model.name,
        description: model.description,
        media_asset_ids: ids_from_json(model.media_asset_ids)?,
        pattern: BreathPattern {
            inhale_seconds: to_u32(model.inhale_seconds),
            hold_seconds: to_u32(model.hold_seconds),
            exhale_seconds: to_u32(model.exhale_seconds),
            cycles: to_u32(model.cycles),
        },
        pattern_type: label(&model.pattern_type)?,
        has_visual_cue: model.has_visual_cue,
        has_audio_cue: model.has_audio_cue,
        cue_style: label(&model.cue_style)?,
        difficulty: label(&model.difficulty)?,
        mastery_criteria: object(model.mastery_criteria),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        is_active: model.is_active,
    })
}

fn model_to_meditation(
    model: meditation_sessions::Model,
) -> Result<MeditationSession, ProgramRepositoryError> {
    Ok(MeditationSession {
        id: model.id,
        instructor_id: UserId::from(model.instructor_id),
        name: model.name,
        description: model.description,
        duration_minutes: to_u32(model.duration_minutes),
        session_type: label(&model.session_type)?,
        guided_script: model.guided_script,
        focus_points: serde_json::from_value(model.focus_points).map_err(corrupt)?,
        background_audio_id: model.background_audio_id,
        guided_audio_id: model.guided_audio_id,
        has_visual_guide: model.has_visual_guide,
        has_ambient_sounds: model.has_ambient_sounds,
        ambient_sound_type: label(&model.ambient_sound_type)?,
        difficulty: label(&model.difficulty)?,
        focus_level_assessment: object(model.focus_level_assessment),
        achievement_criteria: object(model.achievement_criteria),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        is_active: model.is_active,
    })
}

fn model_to_combined(
    model: combined_routines::Model,
) -> Result<CombinedRoutine, ProgramRepositoryError> {
    Ok(CombinedRoutine {
        id: model.id,
        instructor_id: UserId::from(model.instructor_id),
        name: model.name,
        description: model.description,
        routine_ids: ids_from_json(model.routine_ids)?,
        breathing_exercise_ids: ids_from_json(model.breathing_exercise_ids)?,
        meditation_session_ids: ids_from_json(model.meditation_session_ids)?,
        transition_notes: model.transition_notes,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        is_active: model.is_active,
    })
}

fn corrupt(e: impl std::fmt::Display) -> ProgramRepositoryError {
    ProgramRepositoryError::DatabaseError(e.to_string())
}

fn map_db_err(e: DbErr) -> ProgramRepositoryError {
    ProgramRepositoryError::DatabaseError(e.to_string())
}

// Tests
