mod breathing_exercises;
mod combined_routines;
mod meditation_sessions;
mod program_errors;
mod routines;

pub use breathing_exercises::*;
pub use combined_routines::*;
pub use meditation_sessions::*;
pub use routines::*;
