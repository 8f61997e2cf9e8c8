pub mod media_asset;
pub mod policies;
pub mod upload_progress;

pub use media_asset::{
    storage_key_for, CandidateFile, MediaAsset, MediaAssetError, RemovalOutcome, StorageLocation,
};
pub use upload_progress::{
    DirectUploadPolicy, UploadProgress, UploadProgressError, UploadStatus, UploadSummary,
};
