mod program_repository;

pub use program_repository::{
    BreathingExerciseRepository, CombinedRoutineRepository, MeditationSessionRepository,
    ProgramRepositoryError, RoutineRepository,
};
