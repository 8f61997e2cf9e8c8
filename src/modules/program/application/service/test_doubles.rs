//! In-memory program repositories for the service tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{
    BreathingExercise, CombinedRoutine, MeditationSession, Routine,
};
use crate::program::application::ports::outgoing::{
    BreathingExerciseRepository, CombinedRoutineRepository, MeditationSessionRepository,
    ProgramRepositoryError, RoutineRepository,
};

#[derive(Clone, Default)]
pub struct InMemoryPrograms {
    pub fail: Option<ProgramRepositoryError>,
    pub routines: Arc<Mutex<Vec<Routine>>>,
    pub breathing: Arc<Mutex<Vec<BreathingExercise>>>,
    pub meditation: Arc<Mutex<Vec<MeditationSession>>>,
    pub combined: Arc<Mutex<Vec<CombinedRoutine>>>,
}

impl InMemoryPrograms {
    pub fn failing(err: ProgramRepositoryError) -> Self {
        Self {
            fail: Some(err),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ProgramRepositoryError> {
        self.fail.clone().map_or(Ok(()), Err)
    }
}

fn newest_first<T: Clone>(items: &[T], keep: impl Fn(&T) -> bool, created: impl Fn(&T) -> i64) -> Vec<T> {
    let mut out: Vec<T> = items.iter().filter(|i| keep(i)).cloned().collect();
    out.sort_by_key(|i| std::cmp::Reverse(created(i)));
    out
}

#[async_trait]
impl RoutineRepository for InMemoryPrograms {
    async fn create_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError> {
        self.check()?;
        self.routines.lock().unwrap().push(routine.clone());
        Ok(routine.clone())
    }

    async fn list_routines(&self, instructor: UserId) -> Result<Vec<Routine>, ProgramRepositoryError> {
        self.check()?;
        Ok(newest_first(
            &self.routines.lock().unwrap(),
            |r| r.instructor_id == instructor && r.is_active,
            |r| r.created_at.timestamp_micros(),
        ))
    }

    async fn find_routine(&self, instructor: UserId, routine_id: Uuid) -> Result<Routine, ProgramRepositoryError> {
        self.check()?;
        self.routines
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == routine_id && r.instructor_id == instructor)
            .cloned()
            .ok_or(ProgramRepositoryError::NotFound)
    }

    async fn deactivate_routine(
        &self,
        instructor: UserId,
        routine_id: Uuid,
    ) -> Result<Routine, ProgramRepositoryError> {
        self.check()?;
        let mut routines = self.routines.lock().unwrap();
        let routine = routines
            .iter_mut()
            .find(|r| r.id == routine_id && r.instructor_id == instructor)
            .ok_or(ProgramRepositoryError::NotFound)?;
        routine.is_active = false;
        Ok(routine.clone())
    }

    async fn update_routine(&self, routine: &Routine) -> Result<Routine, ProgramRepositoryError> {
        self.check()?;
        let mut routines = self.routines.lock().unwrap();
        let stored = routines
            .iter_mut()
            .find(|r| r.id == routine.id && r.instructor_id == routine.instructor_id)
            .ok_or(ProgramRepositoryError::NotFound)?;
        stored.name = routine.name.clone();
        stored.description = routine.description.clone();
        stored.exercises = routine.exercises.clone();
        stored.updated_at = routine.updated_at;
        Ok(stored.clone())
    }

    async fn find_active_routines(&self, ids: &[Uuid]) -> Result<Vec<Routine>, ProgramRepositoryError> {
        self.check()?;
        Ok(newest_first(
            &self.routines.lock().unwrap(),
            |r| r.is_active && ids.contains(&r.id),
            |r| r.created_at.timestamp_micros(),
        ))
    }
}

#[async_trait]
impl BreathingExerciseRepository for InMemoryPrograms {
    async fn create_breathing_exercise(
        &self,
        exercise: &BreathingExercise,
    ) -> Result<BreathingExercise, ProgramRepositoryError> {
        self.check()?;
        self.breathing.lock().unwrap().push(exercise.clone());
        Ok(exercise.clone())
    }

    async fn list_breathing_exercises(
        &self,
        instructor: UserId,
    ) -> Result<Vec<BreathingExercise>, ProgramRepositoryError> {
        self.check()?;
        Ok(newest_first(
            &self.breathing.lock().unwrap(),
            |b| b.instructor_id == instructor && b.is_active,
            |b| b.created_at.timestamp_micros(),
        ))
    }
}

#[async_trait]
impl MeditationSessionRepository for InMemoryPrograms {
    async fn create_meditation_session(
        &self,
        session: &MeditationSession,
    ) -> Result<MeditationSession, ProgramRepositoryError> {
        self.check()?;
        self.meditation.lock().unwrap().push(session.clone());
        Ok(session.clone())
    }

    async fn list_meditation_sessions(
        &self,
        instructor: UserId,
    ) -> Result<Vec<MeditationSession>, ProgramRepositoryError> {
        self.check()?;
        Ok(newest_first(
            &self.meditation.lock().unwrap(),
            |m| m.instructor_id == instructor && m.is_active,
            |m| m.created_at.timestamp_micros(),
        ))
    }
}

#[async_trait]
impl CombinedRoutineRepository for InMemoryPrograms {
    async fn create_combined_routine(
        &self,
        combined: &CombinedRoutine,
    ) -> Result<CombinedRoutine, ProgramRepositoryError> {
        self.check()?;
        self.combined.lock().unwrap().push(combined.clone());
        Ok(combined.clone())
    }

    async fn list_combined_routines(
        &self,
        instructor: UserId,
    ) -> Result<Vec<CombinedRoutine>, ProgramRepositoryError> {
        self.check()?;
        Ok(newest_first(
            &self.combined.lock().unwrap(),
            |c| c.instructor_id == instructor && c.is_active,
            |c| c.created_at.timestamp_micros(),
        ))
    }
}
