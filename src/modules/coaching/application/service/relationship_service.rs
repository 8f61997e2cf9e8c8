use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{UserId, UserRole};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::coaching::application::domain::{AssignedClient, Relationship};
use crate::coaching::application::ports::incoming::use_cases::{
    AssignClientRequest, AssignClientUseCase, AssignedClientView, CoachingError,
    ListClientsUseCase, UpdateAssignedRoutinesRequest, UpdateAssignedRoutinesUseCase,
};
use crate::coaching::application::ports::outgoing::RelationshipRepository;
use crate::program::application::domain::dedup_ids;
use crate::program::application::ports::outgoing::RoutineRepository;

#[derive(Clone)]
pub struct RelationshipService {
    relationships: Arc<dyn RelationshipRepository>,
    users: Arc<dyn UserQuery>,
    routines: Arc<dyn RoutineRepository>,
}

impl RelationshipService {
    pub fn new(
        relationships: Arc<dyn RelationshipRepository>,
        users: Arc<dyn UserQuery>,
        routines: Arc<dyn RoutineRepository>,
    ) -> Self {
        Self {
            relationships,
            users,
            routines,
        }
    }

    async fn check_routines(&self, instructor: UserId, routine_ids: &[Uuid]) -> Result<(), CoachingError> {
        if routine_ids.is_empty() {
            return Ok(());
        }
        let own: HashSet<Uuid> = self
            .routines
            .list_routines(instructor)
            .await?
            .iter()
            .map(|r| r.id)
            .collect();
        match routine_ids.iter().find(|id| !own.contains(id)) {
            Some(id) => Err(CoachingError::UnknownRoutine(*id)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AssignClientUseCase for RelationshipService {
    async fn execute(
        &self,
        instructor: UserId,
        request: AssignClientRequest,
    ) -> Result<AssignedClientView, CoachingError> {
        let email = request.client_email.trim().to_lowercase();
        let client = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or(CoachingError::ClientNotFound)?;

        if client.role != UserRole::Client {
            return Err(CoachingError::NotAClient);
        }

        let routine_ids = dedup_ids(request.routine_ids);
        self.check_routines(instructor, &routine_ids).await?;

        let relationship = Relationship::new(instructor, UserId::from(client.id), routine_ids, Utc::now());
        let saved = self
            .relationships
            .create_relationship(&relationship)
            .await
            .inspect_err(|e| {
                tracing::warn!(user_id = %instructor, client_id = %client.id, error = %e, "Client assignment rejected")
            })?;

        tracing::info!(
            relationship_id = %saved.id,
            user_id = %instructor,
            client_id = %client.id,
            "Client assigned"
        );

        Ok(AssignedClientView::from(&AssignedClient {
            relationship: saved,
            username: client.username,
            email: client.email,
            full_name: client.full_name,
        }))
    }
}

#[async_trait]
impl ListClientsUseCase for RelationshipService {
    async fn execute(&self, instructor: UserId) -> Result<Vec<AssignedClientView>, CoachingError> {
        let clients = self.relationships.list_clients(instructor).await?;
        Ok(clients.iter().map(AssignedClientView::from).collect())
    }
}

#[async_trait]
impl UpdateAssignedRoutinesUseCase for RelationshipService {
    async fn execute(
        &self,
        instructor: UserId,
        relationship_id: Uuid,
        request: UpdateAssignedRoutinesRequest,
    ) -> Result<AssignedClientView, CoachingError> {
        let routine_ids = dedup_ids(request.routine_ids);
        self.check_routines(instructor, &routine_ids).await?;

        let updated = self
            .relationships
            .set_routine_ids(instructor, relationship_id, &routine_ids)
            .await?;

        tracing::info!(
            %relationship_id,
            user_id = %instructor,
            routines = routine_ids.len(),
            "Assigned routines updated"
        );
        Ok(AssignedClientView::from(&updated))
    }
}
