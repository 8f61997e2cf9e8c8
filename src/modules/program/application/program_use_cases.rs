use std::sync::Arc;

use crate::program::application::ports::incoming::use_cases::{
    AddRoutineExerciseUseCase, CreateBreathingExerciseUseCase, CreateCombinedRoutineUseCase,
    CreateMeditationSessionUseCase, CreateRoutineUseCase, DeactivateRoutineUseCase,
    GetRoutineUseCase, ListBreathingExercisesUseCase, ListCombinedRoutinesUseCase,
    ListMeditationSessionsUseCase, ListRoutinesUseCase, RemoveRoutineExerciseUseCase,
    UpdateRoutineUseCase,
};
use crate::program::application::ports::outgoing::{
    BreathingExerciseRepository, CombinedRoutineRepository, MeditationSessionRepository,
    RoutineRepository,
};
use crate::program::application::service::{
    BreathingExerciseService, CombinedRoutineService, MeditationSessionService, RoutineService,
};

#[derive(Clone)]
pub struct ProgramUseCases {
    pub create_routine: Arc<dyn CreateRoutineUseCase + Send + Sync>,
    pub list_routines: Arc<dyn ListRoutinesUseCase + Send + Sync>,
    pub get_routine: Arc<dyn GetRoutineUseCase + Send + Sync>,
    pub update_routine: Arc<dyn UpdateRoutineUseCase + Send + Sync>,
    pub add_routine_exercise: Arc<dyn AddRoutineExerciseUseCase + Send + Sync>,
    pub remove_routine_exercise: Arc<dyn RemoveRoutineExerciseUseCase + Send + Sync>,
    pub deactivate_routine: Arc<dyn DeactivateRoutineUseCase + Send + Sync>,
    pub create_breathing_exercise: Arc<dyn CreateBreathingExerciseUseCase + Send + Sync>,
    pub list_breathing_exercises: Arc<dyn ListBreathingExercisesUseCase + Send + Sync>,
    pub create_meditation_session: Arc<dyn CreateMeditationSessionUseCase + Send + Sync>,
    pub list_meditation_sessions: Arc<dyn ListMeditationSessionsUseCase + Send + Sync>,
    pub create_combined_routine: Arc<dyn CreateCombinedRoutineUseCase + Send + Sync>,
    pub list_combined_routines: Arc<dyn ListCombinedRoutinesUseCase + Send + Sync>,
}

impl ProgramUseCases {
    /// Wires every program use case onto one store that serves all four tables.
    pub fn from_repository<R>(repository: R) -> Self
    where
        R: RoutineRepository
            + BreathingExerciseRepository
            + MeditationSessionRepository
            + CombinedRoutineRepository
            + Clone
            + 'static,
    {
        let routines = Arc::new(RoutineService::new(repository.clone()));
        let breathing = Arc::new(BreathingExerciseService::new(repository.clone()));
        let meditation = Arc::new(MeditationSessionService::new(repository.clone()));
        let combined = Arc::new(CombinedRoutineService::new(
            Arc::new(repository.clone()),
            Arc::new(repository.clone()),
            Arc::new(repository.clone()),
            Arc::new(repository),
        ));

        Self {
            create_routine: routines.clone(),
            list_routines: routines.clone(),
            get_routine: routines.clone(),
            update_routine: routines.clone(),
            add_routine_exercise: routines.clone(),
            remove_routine_exercise: routines.clone(),
            deactivate_routine: routines,
            create_breathing_exercise: breathing.clone(),
            list_breathing_exercises: breathing,
            create_meditation_session: meditation.clone(),
            list_meditation_sessions: meditation,
            create_combined_routine: combined.clone(),
            list_combined_routines: combined,
        }
    }
}
