use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::ports::incoming::use_cases::{
    CoachingError, GetAssignedRoutineUseCase, ListAssignedRoutinesUseCase,
};
use crate::coaching::application::ports::outgoing::RelationshipRepository;
use crate::program::application::ports::incoming::use_cases::RoutineView;
use crate::program::application::ports::outgoing::RoutineRepository;

/// Client-side view of routines, scoped through the client's relationships.
#[derive(Clone)]
pub struct AssignedRoutineService {
    relationships: Arc<dyn RelationshipRepository>,
    routines: Arc<dyn RoutineRepository>,
}

impl AssignedRoutineService {
    pub fn new(relationships: Arc<dyn RelationshipRepository>, routines: Arc<dyn RoutineRepository>) -> Self {
        Self {
            relationships,
            routines,
        }
    }
}

#[async_trait]
impl ListAssignedRoutinesUseCase for AssignedRoutineService {
    async fn execute(&self, client: UserId) -> Result<Vec<RoutineView>, CoachingError> {
        let ids = self.relationships.assigned_routine_ids(client).await?;
        let routines = self.routines.find_active_routines(&ids).await?;
        Ok(routines.iter().map(RoutineView::from).collect())
    }
}

#[async_trait]
impl GetAssignedRoutineUseCase for AssignedRoutineService {
    async fn execute(&self, client: UserId, routine_id: Uuid) -> Result<RoutineView, CoachingError> {
        let ids = self.relationships.assigned_routine_ids(client).await?;
        if !ids.contains(&routine_id) {
            return Err(CoachingError::RoutineNotFound);
        }

        self.routines
            .find_active_routines(&[routine_id])
            .await?
            .first()
            .map(RoutineView::from)
            .ok_or(CoachingError::RoutineNotFound)
    }
}
