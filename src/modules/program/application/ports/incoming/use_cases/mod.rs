mod breathing_exercises;
mod combined_routines;
mod meditation_sessions;
mod program_error;
mod routines;

pub use breathing_exercises::{
    BreathingExerciseView, CreateBreathingExerciseRequest, CreateBreathingExerciseUseCase,
    ListBreathingExercisesUseCase,
};
pub use combined_routines::{
    CombinedRoutineView, CreateCombinedRoutineRequest, CreateCombinedRoutineUseCase,
    ListCombinedRoutinesUseCase,
};
pub use meditation_sessions::{
    CreateMeditationSessionRequest, CreateMeditationSessionUseCase, ListMeditationSessionsUseCase,
    MeditationSessionView,
};
pub use program_error::ProgramError;
pub use routines::{
    AddRoutineExerciseUseCase, CreateRoutineRequest, CreateRoutineUseCase,
    DeactivateRoutineUseCase, ExerciseInput, ExerciseView, GetRoutineUseCase, ListRoutinesUseCase,
    RemoveRoutineExerciseUseCase, RoutineView, UpdateRoutineRequest, UpdateRoutineUseCase,
};
