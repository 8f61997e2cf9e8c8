use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::media_command::{parse_category, required, sanitize_basename, MediaCommandError};
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::CandidateFile;

#[derive(Debug, Clone)]
pub struct InitDirectUploadCommand {
    owner: UserId,
    category: AssetCategory,
    file: CandidateFile,
}

impl InitDirectUploadCommand {
    pub fn new(
        owner: UserId,
        category: &str,
        file_name: &str,
        content_type: String,
    ) -> Result<Self, MediaCommandError> {
        let category = parse_category(category)?;
        let file_name = sanitize_basename(file_name)?;
        let content_type = required(content_type, "content_type")?;

        Ok(Self {
            owner,
            category,
            file: CandidateFile::new(file_name, content_type, 0),
        })
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }
    pub fn category(&self) -> AssetCategory {
        self.category
    }
    pub fn file(&self) -> &CandidateFile {
        &self.file
    }
}

/// Everything a client needs to `PUT` the object straight to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DirectUploadTicket {
    pub upload_id: Uuid,
    pub upload_url: String,
    pub file_path: String,
    pub bucket: String,
    pub content_type: String,
    pub max_size_bytes: u64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitDirectUploadError {
    #[error("Content type {content_type} is not allowed for {category} assets")]
    InvalidContentType {
        category: AssetCategory,
        content_type: String,
    },

    #[error("Storage service error: {0}")]
    StorageError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait InitDirectUploadUseCase: Send + Sync {
    async fn execute(
        &self,
        command: InitDirectUploadCommand,
    ) -> Result<DirectUploadTicket, InitDirectUploadError>;
}
