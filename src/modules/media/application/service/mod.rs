mod complete_direct_upload_service;
mod init_direct_upload_service;
mod manage_media_assets_service;
mod tracked_upload;
mod upload_media_asset_service;
mod upload_progress_service;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use complete_direct_upload_service::CompleteDirectUploadService;
pub use init_direct_upload_service::InitDirectUploadService;
pub use manage_media_assets_service::{
    DeactivateMediaAssetService, DeleteMediaAssetService, ListMediaAssetsService,
};
pub use upload_media_asset_service::UploadMediaAssetService;
pub use upload_progress_service::{AdvanceUploadService, GetUploadProgressService};
