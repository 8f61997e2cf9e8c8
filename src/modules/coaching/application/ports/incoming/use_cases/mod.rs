mod achievements;
mod assigned_routines;
mod coaching_error;
mod progress;
mod relationships;

pub use achievements::{
    AchievementView, ClientAchievementView, ListAchievementsUseCase, ListClientAchievementsUseCase,
};
pub use assigned_routines::{GetAssignedRoutineUseCase, ListAssignedRoutinesUseCase};
pub use coaching_error::CoachingError;
pub use progress::{
    ListProgressUseCase, ProgressView, RecordProgressRequest, RecordProgressResponse,
    RecordProgressUseCase,
};
pub use relationships::{
    AssignClientRequest, AssignClientUseCase, AssignedClientView, ListClientsUseCase,
    UpdateAssignedRoutinesRequest, UpdateAssignedRoutinesUseCase,
};
