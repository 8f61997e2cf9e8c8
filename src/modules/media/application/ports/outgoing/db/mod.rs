mod media_asset_repository;
mod upload_progress_repository;

pub use media_asset_repository::{MediaAssetRepository, MediaAssetRepositoryError};
pub use upload_progress_repository::{UploadProgressRepository, UploadProgressRepositoryError};
