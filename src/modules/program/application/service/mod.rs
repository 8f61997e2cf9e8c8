mod breathing_exercise_service;
mod combined_routine_service;
mod meditation_session_service;
mod routine_service;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use breathing_exercise_service::BreathingExerciseService;
pub use combined_routine_service::CombinedRoutineService;
pub use meditation_session_service::MeditationSessionService;
pub use routine_service::RoutineService;
