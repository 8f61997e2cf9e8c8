mod achievements;
mod coaching_errors;
mod my_routines;
mod progress;
mod relationships;

pub use achievements::*;
pub use my_routines::*;
pub use progress::*;
pub use relationships::*;
