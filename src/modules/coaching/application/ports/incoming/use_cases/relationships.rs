use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::coaching_error::CoachingError;
use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::AssignedClient;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignClientRequest {
    #[schema(example = "client@example.com")]
    pub client_email: String,
    /// Routines of the calling instructor to assign.
    #[serde(default)]
    pub routine_ids: Vec<Uuid>,
}

/// Replaces the full list; an empty list unassigns every routine.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAssignedRoutinesRequest {
    pub routine_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AssignedClientView {
    pub relationship_id: Uuid,
    pub client_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub routine_ids: Vec<Uuid>,
    pub assigned_at: DateTime<Utc>,
}

impl From<&AssignedClient> for AssignedClientView {
    fn from(c: &AssignedClient) -> Self {
        Self {
            relationship_id: c.relationship.id,
            client_id: c.relationship.client_id.into(),
            username: c.username.clone(),
            email: c.email.clone(),
            full_name: c.full_name.clone(),
            routine_ids: c.relationship.routine_ids.clone(),
            assigned_at: c.relationship.created_at,
        }
    }
}

#[async_trait]
pub trait AssignClientUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        request: AssignClientRequest,
    ) -> Result<AssignedClientView, CoachingError>;
}

#[async_trait]
pub trait ListClientsUseCase: Send + Sync {
    async fn execute(&self, instructor: UserId) -> Result<Vec<AssignedClientView>, CoachingError>;
}

#[async_trait]
pub trait UpdateAssignedRoutinesUseCase: Send + Sync {
    async fn execute(
        &self,
        instructor: UserId,
        relationship_id: Uuid,
        request: UpdateAssignedRoutinesRequest,
    ) -> Result<AssignedClientView, CoachingError>;
}
