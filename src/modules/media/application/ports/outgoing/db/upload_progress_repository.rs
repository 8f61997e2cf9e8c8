use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::{UploadProgress, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadProgressRepositoryError {
    #[error("Upload not found")]
    NotFound,

    /// The stored row moved on since it was read.
    #[error("Upload was changed by another request")]
    Conflict,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Upload attempts are kept as an audit trail and never deleted.
#[async_trait]
pub trait UploadProgressRepository: Send + Sync {
    async fn record_progress(&self, progress: &UploadProgress)
        -> Result<(), UploadProgressRepositoryError>;

    async fn find_progress(
        &self,
        owner: UserId,
        upload_id: Uuid,
    ) -> Result<UploadProgress, UploadProgressRepositoryError>;

    /// Writes status, percentage, error message and `updated_at` in one
    /// statement, but only while the stored row still has status `expected`,
    /// is not terminal, and has a percentage no higher than the new one.
    /// A row that exists but fails that guard yields `Conflict`.
    async fn save_progress(
        &self,
        progress: &UploadProgress,
        expected: UploadStatus,
    ) -> Result<(), UploadProgressRepositoryError>;
}
