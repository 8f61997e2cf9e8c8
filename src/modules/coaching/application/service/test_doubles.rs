//! In-memory coaching repositories for the service tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{
    Achievement, AssignedClient, ClientAchievement, EarnedAchievement, ExerciseProgress,
    Relationship,
};
use crate::coaching::application::ports::outgoing::{
    AchievementRepository, CoachingRepositoryError, ProgressRepository, RelationshipRepository,
};
use crate::tests::support::in_memory_users::InMemoryUsers;

#[derive(Clone, Default)]
pub struct InMemoryCoaching {
    pub fail: Option<CoachingRepositoryError>,
    pub fail_award: bool,
    pub users: InMemoryUsers,
    pub relationships: Arc<Mutex<Vec<Relationship>>>,
    pub progress: Arc<Mutex<Vec<ExerciseProgress>>>,
    pub achievements: Arc<Mutex<Vec<Achievement>>>,
    pub awards: Arc<Mutex<Vec<ClientAchievement>>>,
}

impl InMemoryCoaching {
    pub fn with_users(users: InMemoryUsers) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn failing(err: CoachingRepositoryError) -> Self {
        Self {
            fail: Some(err),
            ..Default::default()
        }
    }

    pub fn add_achievement(&self, achievement: Achievement) {
        self.achievements.lock().unwrap().push(achievement);
    }

    fn check(&self) -> Result<(), CoachingRepositoryError> {
        self.fail.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryCoaching {
    async fn create_relationship(
        &self,
        relationship: &Relationship,
    ) -> Result<Relationship, CoachingRepositoryError> {
        self.check()?;
        let mut relationships = self.relationships.lock().unwrap();
        if relationships.iter().any(|r| {
            r.client_id == relationship.client_id && r.instructor_id == relationship.instructor_id
        }) {
            return Err(CoachingRepositoryError::Conflict);
        }
        relationships.push(relationship.clone());
        Ok(relationship.clone())
    }

    async fn list_clients(
        &self,
        instructor: UserId,
    ) -> Result<Vec<AssignedClient>, CoachingRepositoryError> {
        self.check()?;
        let mut out: Vec<AssignedClient> = self
            .relationships
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.instructor_id == instructor)
            .filter_map(|r| {
                let user = self.users.get(r.client_id.into()).filter(|u| !u.is_deleted)?;
                Some(AssignedClient {
                    relationship: r.clone(),
                    username: user.username,
                    email: user.email,
                    full_name: user.full_name,
                })
            })
            .collect();
        out.sort_by_key(|c| std::cmp::Reverse(c.relationship.created_at));
        Ok(out)
    }

    async fn set_routine_ids(
        &self,
        instructor: UserId,
        relationship_id: Uuid,
        routine_ids: &[Uuid],
    ) -> Result<AssignedClient, CoachingRepositoryError> {
        self.check()?;
        let mut relationships = self.relationships.lock().unwrap();
        let relationship = relationships
            .iter_mut()
            .find(|r| r.id == relationship_id && r.instructor_id == instructor)
            .ok_or(CoachingRepositoryError::NotFound)?;
        let user = self
            .users
            .get(relationship.client_id.into())
            .filter(|u| !u.is_deleted)
            .ok_or(CoachingRepositoryError::NotFound)?;

        relationship.routine_ids = routine_ids.to_vec();
        Ok(AssignedClient {
            relationship: relationship.clone(),
            username: user.username,
            email: user.email,
            full_name: user.full_name,
        })
    }

    async fn assigned_routine_ids(&self, client: UserId) -> Result<Vec<Uuid>, CoachingRepositoryError> {
        self.check()?;
        let mut ids: Vec<Uuid> = Vec::new();
        for r in self.relationships.lock().unwrap().iter().filter(|r| r.client_id == client) {
            for id in &r.routine_ids {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        Ok(ids)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryCoaching {
    async fn record_progress(
        &self,
        progress: &ExerciseProgress,
    ) -> Result<ExerciseProgress, CoachingRepositoryError> {
        self.check()?;
        self.progress.lock().unwrap().push(progress.clone());
        Ok(progress.clone())
    }

    async fn list_progress(
        &self,
        client: UserId,
    ) -> Result<Vec<ExerciseProgress>, CoachingRepositoryError> {
        self.check()?;
        let mut out: Vec<ExerciseProgress> = self
            .progress
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.client_id == client)
            .cloned()
            .collect();
        out.sort_by_key(|p| std::cmp::Reverse(p.completed_at));
        Ok(out)
    }

    async fn completion_times(
        &self,
        client: UserId,
    ) -> Result<Vec<DateTime<Utc>>, CoachingRepositoryError> {
        self.check()?;
        Ok(self
            .progress
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.client_id == client)
            .map(|p| p.completed_at)
            .collect())
    }
}

#[async_trait]
impl AchievementRepository for InMemoryCoaching {
    async fn list_active_achievements(&self) -> Result<Vec<Achievement>, CoachingRepositoryError> {
        self.check()?;
        Ok(self
            .achievements
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active)
            .cloned()
            .collect())
    }

    async fn list_client_achievements(
        &self,
        client: UserId,
    ) -> Result<Vec<EarnedAchievement>, CoachingRepositoryError> {
        self.check()?;
        let achievements = self.achievements.lock().unwrap();
        let mut out: Vec<EarnedAchievement> = self
            .awards
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.client_id == client)
            .filter_map(|award| {
                let achievement = achievements.iter().find(|a| a.id == award.achievement_id)?;
                Some(EarnedAchievement {
                    award: award.clone(),
                    achievement: achievement.clone(),
                })
            })
            .collect();
        out.sort_by_key(|e| std::cmp::Reverse(e.award.earned_at));
        Ok(out)
    }

    async fn award(&self, award: &ClientAchievement) -> Result<(), CoachingRepositoryError> {
        self.check()?;
        if self.fail_award {
            return Err(CoachingRepositoryError::DatabaseError("award failed".into()));
        }
        let mut awards = self.awards.lock().unwrap();
        if awards
            .iter()
            .any(|a| a.client_id == award.client_id && a.achievement_id == award.achievement_id)
        {
            return Err(CoachingRepositoryError::Conflict);
        }
        awards.push(award.clone());
        Ok(())
    }
}
