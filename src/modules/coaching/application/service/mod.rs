mod achievement_evaluator;
mod achievement_service;
mod assigned_routine_service;
mod progress_service;
mod relationship_service;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use achievement_evaluator::AchievementEvaluator;
pub use achievement_service::AchievementService;
pub use assigned_routine_service::AssignedRoutineService;
pub use progress_service::ProgressService;
pub use relationship_service::RelationshipService;
