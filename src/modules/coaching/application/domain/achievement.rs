use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::progress::ProgressStats;
use crate::auth::application::domain::entities::UserId;
use crate::shared::labeled_enum;

labeled_enum! {
    pub enum AchievementType ("achievement type") {
        Consistency => "consistency",
        Mastery => "mastery",
        Milestone => "milestone",
        Special => "special",
    }
}

/// Thresholds an achievement requires. Unknown keys in stored criteria are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct AchievementCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_streak: Option<u32>,
}

impl AchievementCriteria {
    pub fn is_empty(&self) -> bool {
        self.exercise_count.is_none() && self.days_streak.is_none()
    }

    /// Every present criterion must hold. Criteria-less achievements are
    /// awarded by hand and never match.
    pub fn is_met(&self, stats: &ProgressStats) -> bool {
        if self.is_empty() {
            return false;
        }
        self.exercise_count.map_or(true, |n| stats.exercise_count >= n)
            && self.days_streak.map_or(true, |d| stats.days_streak >= d)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub achievement_type: AchievementType,
    pub icon_url: String,
    pub criteria: AchievementCriteria,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientAchievement {
    pub id: Uuid,
    pub client_id: UserId,
    pub achievement_id: Uuid,
    pub earned_at: DateTime<Utc>,
    pub progress_data: Map<String, Value>,
}

impl ClientAchievement {
    /// Snapshot the stats that satisfied the criteria.
    pub fn earned(client_id: UserId, achievement_id: Uuid, stats: &ProgressStats, now: DateTime<Utc>) -> Self {
        let mut progress_data = Map::new();
        progress_data.insert("exercise_count".into(), json!(stats.exercise_count));
        progress_data.insert("days_streak".into(), json!(stats.days_streak));

        Self {
            id: Uuid::new_v4(),
            client_id,
            achievement_id,
            earned_at: now,
            progress_data,
        }
    }
}

/// An award joined with its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EarnedAchievement {
    pub award: ClientAchievement,
    pub achievement: Achievement,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(exercise_count: u64, days_streak: u32) -> ProgressStats {
        ProgressStats {
            exercise_count,
            days_streak,
        }
    }

    #[test]
    fn test_all_present_criteria_must_hold() {
        let criteria = AchievementCriteria {
            exercise_count: Some(10),
            days_streak: Some(7),
        };
        assert!(criteria.is_met(&stats(10, 7)));
        assert!(!criteria.is_met(&stats(10, 6)));
        assert!(!criteria.is_met(&stats(9, 30)));
    }

    #[test]
    fn test_single_criterion() {
        let criteria = AchievementCriteria {
            exercise_count: Some(1),
            days_streak: None,
        };
        assert!(criteria.is_met(&stats(1, 1)));
        assert!(!criteria.is_met(&stats(0, 0)));
    }

    #[test]
    fn test_empty_criteria_never_met() {
        assert!(!AchievementCriteria::default().is_met(&stats(1000, 365)));
    }

    #[test]
    fn test_criteria_parse_ignores_unknown_keys() {
        let criteria: AchievementCriteria =
            serde_json::from_value(json!({"days_streak": 7, "mood": "calm"})).unwrap();
        assert_eq!(criteria.days_streak, Some(7));
        assert_eq!(criteria.exercise_count, None);
    }

    #[test]
    fn test_earned_snapshots_stats() {
        let award = ClientAchievement::earned(
            UserId::from(Uuid::new_v4()),
            Uuid::new_v4(),
            &stats(12, 3),
            Utc::now(),
        );
        assert_eq!(award.progress_data["exercise_count"], 12);
        assert_eq!(award.progress_data["days_streak"], 3);
    }
}
