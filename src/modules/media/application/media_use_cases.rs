use std::sync::Arc;

use crate::media::application::ports::incoming::use_cases::{
    AdvanceUploadUseCase, CompleteDirectUploadUseCase, DeactivateMediaAssetUseCase, DeleteMediaAssetUseCase,
    GetUploadProgressUseCase, InitDirectUploadUseCase, ListMediaAssetsUseCase,
    UploadMediaAssetUseCase,
};

#[derive(Clone)]
pub struct MediaUseCases {
    pub upload: Arc<dyn UploadMediaAssetUseCase + Send + Sync>,
    pub init_direct_upload: Arc<dyn InitDirectUploadUseCase + Send + Sync>,
    pub complete_direct_upload: Arc<dyn CompleteDirectUploadUseCase + Send + Sync>,
    pub advance_upload: Arc<dyn AdvanceUploadUseCase + Send + Sync>,
    pub get_upload_progress: Arc<dyn GetUploadProgressUseCase + Send + Sync>,
    pub list: Arc<dyn ListMediaAssetsUseCase + Send + Sync>,
    pub deactivate: Arc<dyn DeactivateMediaAssetUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteMediaAssetUseCase + Send + Sync>,
}
