pub mod achievement;
pub mod progress;
pub mod relationship;

pub use achievement::{
    Achievement, AchievementCriteria, AchievementType, ClientAchievement, EarnedAchievement,
};
pub use progress::{
    validate_difficulty_rating, ExerciseProgress, ProgressStats, ProgressTarget,
    ProgressValidationError,
};
pub use relationship::{AssignedClient, Relationship};
