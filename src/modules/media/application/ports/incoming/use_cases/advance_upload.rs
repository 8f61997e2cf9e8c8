use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::{UploadProgressError, UploadStatus, UploadSummary};

#[derive(Debug, Clone)]
pub struct AdvanceUploadCommand {
    pub owner: UserId,
    pub upload_id: Uuid,
    pub bytes_uploaded: u64,
    pub status: Option<UploadStatus>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvanceUploadError {
    #[error("Upload not found")]
    NotFound,

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: UploadStatus, to: UploadStatus },

    #[error("Upload was changed by another request")]
    Conflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<UploadProgressError> for AdvanceUploadError {
    fn from(err: UploadProgressError) -> Self {
        match err {
            UploadProgressError::InvalidStateTransition { from, to } => {
                AdvanceUploadError::InvalidStateTransition { from, to }
            }
            UploadProgressError::UnknownStatus(s) => {
                AdvanceUploadError::RepositoryError(format!("unknown status {s}"))
            }
        }
    }
}

#[async_trait]
pub trait AdvanceUploadUseCase: Send + Sync {
    async fn execute(&self, command: AdvanceUploadCommand) -> Result<UploadSummary, AdvanceUploadError>;
}
