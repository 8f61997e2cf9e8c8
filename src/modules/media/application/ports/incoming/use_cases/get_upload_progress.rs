use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::UploadSummary;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetUploadProgressError {
    #[error("Upload not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetUploadProgressUseCase: Send + Sync {
    async fn execute(
        &self,
        owner: UserId,
        upload_id: Uuid,
    ) -> Result<UploadSummary, GetUploadProgressError>;
}
