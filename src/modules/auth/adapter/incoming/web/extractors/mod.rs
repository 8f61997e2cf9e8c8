pub mod auth;

pub use auth::{AuthenticatedUser, ClientUser, InstructorUser, VerifiedUser};
