pub mod media_assets;
pub mod upload_progress;
