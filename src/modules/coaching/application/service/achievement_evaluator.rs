use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{ClientAchievement, EarnedAchievement, ProgressStats};
use crate::coaching::application::ports::outgoing::{
    AchievementRepository, CoachingRepositoryError, ProgressRepository,
};

/// Awards every active achievement whose criteria the client's history now
/// meets and that the client does not already hold.
#[derive(Clone)]
pub struct AchievementEvaluator {
    progress: Arc<dyn ProgressRepository>,
    achievements: Arc<dyn AchievementRepository>,
}

impl AchievementEvaluator {
    pub fn new(
        progress: Arc<dyn ProgressRepository>,
        achievements: Arc<dyn AchievementRepository>,
    ) -> Self {
        Self {
            progress,
            achievements,
        }
    }

    /// Failures of individual awards are logged and skipped.
    pub async fn evaluate(&self, client: UserId) -> Result<Vec<EarnedAchievement>, CoachingRepositoryError> {
        let completions = self.progress.completion_times(client).await?;
        let stats = ProgressStats::from_completions(&completions);

        let held: HashSet<Uuid> = self
            .achievements
            .list_client_achievements(client)
            .await?
            .iter()
            .map(|e| e.award.achievement_id)
            .collect();

        let candidates = self.achievements.list_active_achievements().await?;
        let now = Utc::now();
        let mut earned = Vec::new();

        for achievement in candidates
            .into_iter()
            .filter(|a| !held.contains(&a.id) && a.criteria.is_met(&stats))
        {
            let award = ClientAchievement::earned(client, achievement.id, &stats, now);
            match self.achievements.award(&award).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %client,
                        achievement_id = %achievement.id,
                        achievement = %achievement.name,
                        "Achievement earned"
                    );
                    earned.push(EarnedAchievement { award, achievement });
                }
                Err(CoachingRepositoryError::Conflict) => {}
                Err(e) => {
                    tracing::warn!(
                        user_id = %client,
                        achievement_id = %achievement.id,
                        error = %e,
                        "Failed to award achievement"
                    );
                }
            }
        }

        Ok(earned)
    }
}
