use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::coaching_error::CoachingError;
use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{
    Achievement, AchievementCriteria, AchievementType, EarnedAchievement,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AchievementView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub achievement_type: AchievementType,
    pub icon_url: String,
    pub criteria: AchievementCriteria,
}

impl From<&Achievement> for AchievementView {
    fn from(a: &Achievement) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            description: a.description.clone(),
            achievement_type: a.achievement_type,
            icon_url: a.icon_url.clone(),
            criteria: a.criteria,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClientAchievementView {
    pub id: Uuid,
    pub achievement: AchievementView,
    pub earned_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub progress_data: Map<String, Value>,
}

impl From<&EarnedAchievement> for ClientAchievementView {
    fn from(e: &EarnedAchievement) -> Self {
        Self {
            id: e.award.id,
            achievement: AchievementView::from(&e.achievement),
            earned_at: e.award.earned_at,
            progress_data: e.award.progress_data.clone(),
        }
    }
}

#[async_trait]
pub trait ListAchievementsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<AchievementView>, CoachingError>;
}

#[async_trait]
pub trait ListClientAchievementsUseCase: Send + Sync {
    async fn execute(&self, client: UserId) -> Result<Vec<ClientAchievementView>, CoachingError>;
}
