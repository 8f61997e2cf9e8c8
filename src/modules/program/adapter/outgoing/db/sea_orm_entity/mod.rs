pub mod breathing_exercises;
pub mod combined_routines;
pub mod meditation_sessions;
pub mod routines;
