use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::media_command::{
    parse_category, required, sanitize_basename, MediaAssetView, MediaCommandError,
    MAX_ASSET_NAME_LEN,
};
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::{MediaAssetError, UploadSummary};

/// A traditional upload: the bytes travel through this service.
#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    owner: UserId,
    name: String,
    category: AssetCategory,
    file_name: String,
    content_type: String,
    duration_seconds: Option<u32>,
    bytes: Vec<u8>,
}

impl UploadMediaCommand {
    pub fn builder() -> UploadMediaCommandBuilder {
        UploadMediaCommandBuilder::default()
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn category(&self) -> AssetCategory {
        self.category
    }
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration_seconds
    }
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Default)]
pub struct UploadMediaCommandBuilder {
    owner: Option<UserId>,
    name: Option<String>,
    category: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    duration_seconds: Option<u32>,
    bytes: Option<Vec<u8>>,
}

impl UploadMediaCommandBuilder {
    pub fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn duration_seconds(mut self, duration_seconds: Option<u32>) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = Some(bytes);
        self
    }

    pub fn build(self) -> Result<UploadMediaCommand, MediaCommandError> {
        let owner = self.owner.ok_or(MediaCommandError::MissingField("owner"))?;
        let name = required(
            self.name.ok_or(MediaCommandError::MissingField("name"))?,
            "name",
        )?;
        if name.chars().count() > MAX_ASSET_NAME_LEN {
            return Err(MediaCommandError::NameTooLong);
        }

        let category = parse_category(
            &self
                .category
                .ok_or(MediaCommandError::MissingField("category"))?,
        )?;
        let file_name = sanitize_basename(
            &self
                .file_name
                .ok_or(MediaCommandError::MissingField("file_name"))?,
        )?;
        let content_type = required(
            self.content_type
                .ok_or(MediaCommandError::MissingField("content_type"))?,
            "content_type",
        )?;
        let bytes = self.bytes.ok_or(MediaCommandError::MissingField("file"))?;
        if bytes.is_empty() {
            return Err(MediaCommandError::MissingField("file"));
        }

        Ok(UploadMediaCommand {
            owner,
            name,
            category,
            file_name,
            content_type,
            duration_seconds: self.duration_seconds,
            bytes,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadedMedia {
    pub upload_id: Uuid,
    pub asset: MediaAssetView,
    pub upload: UploadSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadMediaError {
    #[error("Content type {content_type} is not allowed for {category} assets")]
    InvalidContentType {
        category: AssetCategory,
        content_type: String,
    },

    #[error("File too large (max {max_bytes} bytes, got {actual_bytes} bytes)")]
    FileTooLarge { max_bytes: u64, actual_bytes: u64 },

    #[error("Storage upload failed: {0}")]
    StorageUploadFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<MediaAssetError> for UploadMediaError {
    fn from(err: MediaAssetError) -> Self {
        match err {
            MediaAssetError::InvalidContentType {
                category,
                content_type,
            } => UploadMediaError::InvalidContentType {
                category,
                content_type,
            },
            MediaAssetError::FileTooLarge {
                max_bytes,
                actual_bytes,
            } => UploadMediaError::FileTooLarge {
                max_bytes,
                actual_bytes,
            },
            MediaAssetError::StorageUploadFailed(msg) => UploadMediaError::StorageUploadFailed(msg),
            MediaAssetError::StorageRemovalFailed(msg) => UploadMediaError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait UploadMediaAssetUseCase: Send + Sync {
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> UploadMediaCommandBuilder {
        UploadMediaCommand::builder()
            .owner(UserId::from(Uuid::new_v4()))
            .name("Morning light")
            .category("Image")
            .file_name("sunrise.png")
            .content_type("image/png")
            .bytes(vec![0u8; 16])
    }

    #[test]
    fn test_build_valid_command() {
        let cmd = base().build().unwrap();
        assert_eq!(cmd.category(), AssetCategory::Image);
        assert_eq!(cmd.size_bytes(), 16);
        assert_eq!(cmd.file_name(), "sunrise.png");
    }

    #[test]
    fn test_build_rejects_unknown_category() {
        let err = base().category("document").build().unwrap_err();
        assert!(matches!(err, MediaCommandError::UnknownCategory(_)));
    }

    #[test]
    fn test_build_rejects_empty_body() {
        let err = base().bytes(vec![]).build().unwrap_err();
        assert_eq!(err, MediaCommandError::MissingField("file"));
    }

    #[test]
    fn test_build_rejects_blank_name() {
        let err = base().name("  ").build().unwrap_err();
        assert_eq!(err, MediaCommandError::MissingField("name"));
    }

    #[test]
    fn test_build_rejects_long_name() {
        let err = base().name("x".repeat(101)).build().unwrap_err();
        assert_eq!(err, MediaCommandError::NameTooLong);
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: UploadMediaError = MediaAssetError::FileTooLarge {
            max_bytes: 1,
            actual_bytes: 2,
        }
        .into();
        assert_eq!(
            err,
            UploadMediaError::FileTooLarge {
                max_bytes: 1,
                actual_bytes: 2
            }
        );
    }
}
