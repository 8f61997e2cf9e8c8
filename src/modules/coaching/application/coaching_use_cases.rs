use std::sync::Arc;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::coaching::application::ports::incoming::use_cases::{
    AssignClientUseCase, GetAssignedRoutineUseCase, ListAchievementsUseCase,
    ListAssignedRoutinesUseCase, ListClientAchievementsUseCase, ListClientsUseCase,
    ListProgressUseCase, RecordProgressUseCase, UpdateAssignedRoutinesUseCase,
};
use crate::coaching::application::ports::outgoing::{
    AchievementRepository, ProgressRepository, RelationshipRepository,
};
use crate::coaching::application::service::{
    AchievementEvaluator, AchievementService, AssignedRoutineService, ProgressService,
    RelationshipService,
};
use crate::program::application::ports::outgoing::RoutineRepository;

#[derive(Clone)]
pub struct CoachingUseCases {
    pub assign_client: Arc<dyn AssignClientUseCase + Send + Sync>,
    pub list_clients: Arc<dyn ListClientsUseCase + Send + Sync>,
    pub update_assigned_routines: Arc<dyn UpdateAssignedRoutinesUseCase + Send + Sync>,
    pub list_assigned_routines: Arc<dyn ListAssignedRoutinesUseCase + Send + Sync>,
    pub get_assigned_routine: Arc<dyn GetAssignedRoutineUseCase + Send + Sync>,
    pub record_progress: Arc<dyn RecordProgressUseCase + Send + Sync>,
    pub list_progress: Arc<dyn ListProgressUseCase + Send + Sync>,
    pub list_achievements: Arc<dyn ListAchievementsUseCase + Send + Sync>,
    pub list_client_achievements: Arc<dyn ListClientAchievementsUseCase + Send + Sync>,
}

impl CoachingUseCases {
    /// Wires the coaching use cases onto one store serving the relationship,
    /// progress and achievement tables.
    pub fn from_repository<R>(
        repository: R,
        users: Arc<dyn UserQuery>,
        routines: Arc<dyn RoutineRepository>,
    ) -> Self
    where
        R: RelationshipRepository + ProgressRepository + AchievementRepository + Clone + 'static,
    {
        let relationships = Arc::new(RelationshipService::new(
            Arc::new(repository.clone()),
            users,
            routines.clone(),
        ));
        let assigned = Arc::new(AssignedRoutineService::new(Arc::new(repository.clone()), routines));
        let evaluator = AchievementEvaluator::new(
            Arc::new(repository.clone()),
            Arc::new(repository.clone()),
        );
        let progress = Arc::new(ProgressService::new(Arc::new(repository.clone()), evaluator));
        let achievements = Arc::new(AchievementService::new(Arc::new(repository)));

        Self {
            assign_client: relationships.clone(),
            list_clients: relationships.clone(),
            update_assigned_routines: relationships,
            list_assigned_routines: assigned.clone(),
            get_assigned_routine: assigned,
            record_progress: progress.clone(),
            list_progress: progress,
            list_achievements: achievements.clone(),
            list_client_achievements: achievements,
        }
    }
}
