pub mod auth;
pub mod coaching;
pub mod email;
pub mod media;
pub mod program;
