pub mod achievements;
pub mod client_achievements;
pub mod client_instructor_relationships;
pub mod exercise_progress;
