use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::program::application::domain::{dedup_ids, validate_name, CombinedRoutine};
use crate::program::application::ports::incoming::use_cases::{
    CombinedRoutineView, CreateCombinedRoutineRequest, CreateCombinedRoutineUseCase,
    ListCombinedRoutinesUseCase, ProgramError,
};
use crate::program::application::ports::outgoing::{
    BreathingExerciseRepository, CombinedRoutineRepository, MeditationSessionRepository,
    RoutineRepository,
};

/// Needs read access to the other program kinds to check references.
#[derive(Clone)]
pub struct CombinedRoutineService {
    combined: Arc<dyn CombinedRoutineRepository>,
    routines: Arc<dyn RoutineRepository>,
    breathing: Arc<dyn BreathingExerciseRepository>,
    meditation: Arc<dyn MeditationSessionRepository>,
}

impl CombinedRoutineService {
    pub fn new(
        combined: Arc<dyn CombinedRoutineRepository>,
        routines: Arc<dyn RoutineRepository>,
        breathing: Arc<dyn BreathingExerciseRepository>,
        meditation: Arc<dyn MeditationSessionRepository>,
    ) -> Self {
        Self {
            combined,
            routines,
            breathing,
            meditation,
        }
    }

    async fn check_references(
        &self,
        instructor: UserId,
        routine_ids: &[Uuid],
        breathing_ids: &[Uuid],
        meditation_ids: &[Uuid],
    ) -> Result<(), ProgramError> {
        if !routine_ids.is_empty() {
            let known: HashSet<Uuid> = self
                .routines
                .list_routines(instructor)
                .await?
                .iter()
                .map(|r| r.id)
                .collect();
            first_unknown(routine_ids, &known)?;
        }
        if !breathing_ids.is_empty() {
            let known: HashSet<Uuid> = self
                .breathing
                .list_breathing_exercises(instructor)
                .await?
                .iter()
                .map(|b| b.id)
                .collect();
            first_unknown(breathing_ids, &known)?;
        }
        if !meditation_ids.is_empty() {
            let known: HashSet<Uuid> = self
                .meditation
                .list_meditation_sessions(instructor)
                .await?
                .iter()
                .map(|m| m.id)
                .collect();
            first_unknown(meditation_ids, &known)?;
        }
        Ok(())
    }
}

fn first_unknown(ids: &[Uuid], known: &HashSet<Uuid>) -> Result<(), ProgramError> {
    match ids.iter().find(|id| !known.contains(id)) {
        Some(id) => Err(ProgramError::UnknownReference(*id)),
        None => Ok(()),
    }
}

#[async_trait]
impl CreateCombinedRoutineUseCase for CombinedRoutineService {
    async fn execute(
        &self,
        instructor: UserId,
        request: CreateCombinedRoutineRequest,
    ) -> Result<CombinedRoutineView, ProgramError> {
        let name = validate_name(&request.name)?;
        let routine_ids = dedup_ids(request.routine_ids);
        let breathing_exercise_ids = dedup_ids(request.breathing_exercise_ids);
        let meditation_session_ids = dedup_ids(request.meditation_session_ids);

        self.check_references(
            instructor,
            &routine_ids,
            &breathing_exercise_ids,
            &meditation_session_ids,
        )
        .await
        .inspect_err(|e| {
            tracing::warn!(user_id = %instructor, error = %e, "Combined routine references rejected")
        })?;

        let now = Utc::now();
        let combined = CombinedRoutine {
            id: Uuid::new_v4(),
            instructor_id: instructor,
            name,
            description: request.description,
            routine_ids,
            breathing_exercise_ids,
            meditation_session_ids,
            transition_notes: request.transition_notes,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let saved = self.combined.create_combined_routine(&combined).await?;
        tracing::info!(combined_id = %saved.id, user_id = %instructor, "Combined routine created");
        Ok(CombinedRoutineView::from(&saved))
    }
}

#[async_trait]
impl ListCombinedRoutinesUseCase for CombinedRoutineService {
    async fn execute(&self, instructor: UserId) -> Result<Vec<CombinedRoutineView>, ProgramError> {
        let combined = self.combined.list_combined_routines(instructor).await?;
        Ok(combined.iter().map(CombinedRoutineView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::application::ports::incoming::use_cases::{
        CreateRoutineRequest, CreateRoutineUseCase,
    };
    use crate::program::application::service::routine_service::RoutineService;
    use crate::program::application::service::test_doubles::InMemoryPrograms;

    fn service(repo: &InMemoryPrograms) -> CombinedRoutineService {
        CombinedRoutineService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    fn request(routine_ids: Vec<Uuid>) -> CreateCombinedRoutineRequest {
        CreateCombinedRoutineRequest {
            name: "Full reset".to_string(),
            description: String::new(),
            routine_ids,
            breathing_exercise_ids: vec![],
            meditation_session_ids: vec![],
            transition_notes: "Rest 30s between".to_string(),
        }
    }

    async fn seed_routine(repo: &InMemoryPrograms, instructor: UserId) -> Uuid {
        let routines = RoutineService::new(repo.clone());
        CreateRoutineUseCase::execute(
            &routines,
            instructor,
            CreateRoutineRequest {
                name: "Stretch".to_string(),
                description: String::new(),
                exercises: vec![],
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_with_own_references() {
        let repo = InMemoryPrograms::default();
        let instructor = UserId::from(Uuid::new_v4());
        let routine_id = seed_routine(&repo, instructor).await;

        let view = CreateCombinedRoutineUseCase::execute(
            &service(&repo),
            instructor,
            request(vec![routine_id, routine_id]),
        )
        .await
        .unwrap();

        assert_eq!(view.routine_ids, vec![routine_id]);
        let listed = ListCombinedRoutinesUseCase::execute(&service(&repo), instructor)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_reference_rejected() {
        let repo = InMemoryPrograms::default();
        let owner = UserId::from(Uuid::new_v4());
        let routine_id = seed_routine(&repo, owner).await;

        let other = UserId::from(Uuid::new_v4());
        let err = CreateCombinedRoutineUseCase::execute(&service(&repo), other, request(vec![routine_id]))
            .await
            .unwrap_err();

        assert_eq!(err, ProgramError::UnknownReference(routine_id));
        assert!(repo.combined.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_breathing_reference_rejected() {
        let repo = InMemoryPrograms::default();
        let missing = Uuid::new_v4();
        let mut req = request(vec![]);
        req.breathing_exercise_ids = vec![missing];

        let err = CreateCombinedRoutineUseCase::execute(&service(&repo), UserId::from(Uuid::new_v4()), req)
            .await
            .unwrap_err();
        assert_eq!(err, ProgramError::UnknownReference(missing));
    }
}
