mod coaching_repository;

pub use coaching_repository::{
    AchievementRepository, CoachingRepositoryError, ProgressRepository, RelationshipRepository,
};
