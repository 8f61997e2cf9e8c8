mod advance_upload;
mod complete_direct_upload;
mod get_upload_progress;
mod init_direct_upload;
mod manage_media_assets;
mod media_command;
mod upload_media_asset;

pub use advance_upload::{AdvanceUploadCommand, AdvanceUploadError, AdvanceUploadUseCase};
pub use complete_direct_upload::{
    CompleteDirectUploadCommand, CompleteDirectUploadError, CompleteDirectUploadUseCase,
};
pub use get_upload_progress::{GetUploadProgressError, GetUploadProgressUseCase};
pub use init_direct_upload::{
    DirectUploadTicket, InitDirectUploadCommand, InitDirectUploadError, InitDirectUploadUseCase,
};
pub use manage_media_assets::{
    DeactivateMediaAssetUseCase, DeleteMediaAssetUseCase, ListMediaAssetsUseCase,
    ManageMediaError,
};
pub use media_command::{MediaAssetView, MediaCommandError};
pub use upload_media_asset::{
    UploadMediaAssetUseCase, UploadMediaCommand, UploadMediaCommandBuilder, UploadMediaError,
    UploadedMedia,
};
