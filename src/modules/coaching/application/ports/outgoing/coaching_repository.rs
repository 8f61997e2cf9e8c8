use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{
    Achievement, AssignedClient, ClientAchievement, EarnedAchievement, ExerciseProgress,
    Relationship,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachingRepositoryError {
    #[error("Record already exists")]
    Conflict,

    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// `Conflict` when the (client, instructor) pair already exists.
    async fn create_relationship(
        &self,
        relationship: &Relationship,
    ) -> Result<Relationship, CoachingRepositoryError>;

    /// Newest assignment first; clients whose account was deleted are left out.
    async fn list_clients(
        &self,
        instructor: UserId,
    ) -> Result<Vec<AssignedClient>, CoachingRepositoryError>;

    /// Replaces the routines of a relationship held by `instructor`.
    /// `NotFound` for other instructors' relationships or deleted clients.
    async fn set_routine_ids(
        &self,
        instructor: UserId,
        relationship_id: Uuid,
        routine_ids: &[Uuid],
    ) -> Result<AssignedClient, CoachingRepositoryError>;

    /// Routine ids assigned to the client by any instructor, without repeats.
    async fn assigned_routine_ids(&self, client: UserId) -> Result<Vec<Uuid>, CoachingRepositoryError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn record_progress(
        &self,
        progress: &ExerciseProgress,
    ) -> Result<ExerciseProgress, CoachingRepositoryError>;

    /// Newest first.
    async fn list_progress(
        &self,
        client: UserId,
    ) -> Result<Vec<ExerciseProgress>, CoachingRepositoryError>;

    async fn completion_times(
        &self,
        client: UserId,
    ) -> Result<Vec<DateTime<Utc>>, CoachingRepositoryError>;
}

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    async fn list_active_achievements(&self) -> Result<Vec<Achievement>, CoachingRepositoryError>;

    /// Newest award first.
    async fn list_client_achievements(
        &self,
        client: UserId,
    ) -> Result<Vec<EarnedAchievement>, CoachingRepositoryError>;

    /// `Conflict` when the client already holds the achievement.
    async fn award(&self, award: &ClientAchievement) -> Result<(), CoachingRepositoryError>;
}
