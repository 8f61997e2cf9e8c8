pub mod api;
mod labeled_enum;

pub(crate) use labeled_enum::labeled_enum;
pub use labeled_enum::UnknownLabel;
