use async_trait::async_trait;
use uuid::Uuid;

use super::media_command::{required, MediaCommandError, MAX_ASSET_NAME_LEN};
use super::upload_media_asset::UploadedMedia;
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::{MediaAssetError, UploadStatus};

/// Sent once the client's `PUT` to the signed URL has finished.
#[derive(Debug, Clone)]
pub struct CompleteDirectUploadCommand {
    owner: UserId,
    upload_id: Uuid,
    name: String,
    size_bytes: u64,
    duration_seconds: Option<u32>,
}

impl CompleteDirectUploadCommand {
    pub fn new(
        owner: UserId,
        upload_id: Uuid,
        name: String,
        size_bytes: u64,
        duration_seconds: Option<u32>,
    ) -> Result<Self, MediaCommandError> {
        let name = required(name, "name")?;
        if name.chars().count() > MAX_ASSET_NAME_LEN {
            return Err(MediaCommandError::NameTooLong);
        }
        if size_bytes == 0 {
            return Err(MediaCommandError::MissingField("size_bytes"));
        }

        Ok(Self {
            owner,
            upload_id,
            name,
            size_bytes,
            duration_seconds,
        })
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }
    pub fn upload_id(&self) -> Uuid {
        self.upload_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration_seconds
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompleteDirectUploadError {
    #[error("Upload not found")]
    NotFound,

    #[error("Upload was not started as a direct upload")]
    NotDirectUpload,

    #[error("Upload is already {0}")]
    AlreadyFinished(UploadStatus),

    #[error("Content type {content_type} is not allowed for {category} assets")]
    InvalidContentType {
        category: AssetCategory,
        content_type: String,
    },

    #[error("File too large (max {max_bytes} bytes, got {actual_bytes} bytes)")]
    FileTooLarge { max_bytes: u64, actual_bytes: u64 },

    #[error("Upload was changed by another request")]
    Conflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<MediaAssetError> for CompleteDirectUploadError {
    fn from(err: MediaAssetError) -> Self {
        match err {
            MediaAssetError::InvalidContentType {
                category,
                content_type,
            } => Self::InvalidContentType {
                category,
                content_type,
            },
            MediaAssetError::FileTooLarge {
                max_bytes,
                actual_bytes,
            } => Self::FileTooLarge {
                max_bytes,
                actual_bytes,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait CompleteDirectUploadUseCase: Send + Sync {
    async fn execute(
        &self,
        command: CompleteDirectUploadCommand,
    ) -> Result<UploadedMedia, CompleteDirectUploadError>;
}
