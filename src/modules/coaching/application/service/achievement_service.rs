use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::ports::incoming::use_cases::{
    AchievementView, ClientAchievementView, CoachingError, ListAchievementsUseCase,
    ListClientAchievementsUseCase,
};
use crate::coaching::application::ports::outgoing::AchievementRepository;

#[derive(Clone)]
pub struct AchievementService {
    achievements: Arc<dyn AchievementRepository>,
}

impl AchievementService {
    pub fn new(achievements: Arc<dyn AchievementRepository>) -> Self {
        Self { achievements }
    }
}

#[async_trait]
impl ListAchievementsUseCase for AchievementService {
    async fn execute(&self) -> Result<Vec<AchievementView>, CoachingError> {
        let catalog = self.achievements.list_active_achievements().await?;
        Ok(catalog.iter().map(AchievementView::from).collect())
    }
}

#[async_trait]
impl ListClientAchievementsUseCase for AchievementService {
    async fn execute(&self, client: UserId) -> Result<Vec<ClientAchievementView>, CoachingError> {
        let earned = self.achievements.list_client_achievements(client).await?;
        Ok(earned.iter().map(ClientAchievementView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::application::domain::{
        Achievement, AchievementCriteria, AchievementType, ClientAchievement, ProgressStats,
    };
    use crate::coaching::application::service::test_doubles::InMemoryCoaching;
    use chrono::Utc;
    use uuid::Uuid;

    fn achievement(name: &str, active: bool) -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            achievement_type: AchievementType::Consistency,
            icon_url: "https://cdn.example.com/week.png".to_string(),
            criteria: AchievementCriteria {
                exercise_count: None,
                days_streak: Some(7),
            },
            created_at: Utc::now(),
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_catalog_lists_active_only() {
        let repo = InMemoryCoaching::default();
        repo.add_achievement(achievement("Week", true));
        repo.add_achievement(achievement("Old", false));

        let catalog = ListAchievementsUseCase::execute(&AchievementService::new(Arc::new(repo)))
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "Week");
        assert_eq!(catalog[0].criteria.days_streak, Some(7));
    }

    #[tokio::test]
    async fn test_client_achievements_scoped_to_client() {
        let repo = InMemoryCoaching::default();
        let week = achievement("Week", true);
        repo.add_achievement(week.clone());

        let (client, other) = (UserId::from(Uuid::new_v4()), UserId::from(Uuid::new_v4()));
        repo.awards.lock().unwrap().push(ClientAchievement::earned(
            client,
            week.id,
            &ProgressStats {
                exercise_count: 7,
                days_streak: 7,
            },
            Utc::now(),
        ));

        let service = AchievementService::new(Arc::new(repo));
        let mine = ListClientAchievementsUseCase::execute(&service, client).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].achievement.id, week.id);
        assert!(ListClientAchievementsUseCase::execute(&service, other)
            .await
            .unwrap()
            .is_empty());
    }
}
