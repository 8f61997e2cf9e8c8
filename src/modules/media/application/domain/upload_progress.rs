use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::media_asset::{CandidateFile, StorageLocation};
use crate::media::application::domain::policies::AssetCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Pending => "pending",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "processing",
            UploadStatus::Completed => "completed",
            UploadStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }

    /// Forward-only transitions; `Failed` is reachable from any non-terminal state.
    pub fn can_transition_to(&self, next: UploadStatus) -> bool {
        use UploadStatus::*;

        match (self, next) {
            (Completed, _) | (Failed, _) => false,
            (_, Failed) => true,
            (Pending, Uploading) => true,
            (Uploading, Processing) => true,
            (Processing, Completed) => true,
            (Pending, _) | (Uploading, _) | (Processing, _) => false,
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UploadStatus {
    type Err = UploadProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UploadStatus::Pending),
            "uploading" => Ok(UploadStatus::Uploading),
            "processing" => Ok(UploadStatus::Processing),
            "completed" => Ok(UploadStatus::Completed),
            "failed" => Ok(UploadStatus::Failed),
            other => Err(UploadProgressError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadProgressError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: UploadStatus, to: UploadStatus },

    #[error("Unknown upload status: {0}")]
    UnknownStatus(String),
}

/// Pre-authorized direct upload handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectUploadPolicy {
    pub file_path: String,
    pub category: AssetCategory,
    pub max_size_bytes: u64,
    pub content_type: String,
    pub bucket: String,
    pub expires_at: DateTime<Utc>,
    pub upload_url: String,
}

/// Client-facing snapshot of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadSummary {
    pub file_name: String,
    pub asset_category: AssetCategory,
    pub status: UploadStatus,
    pub progress_percentage: u8,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    pub id: Uuid,
    pub owner: UserId,
    pub file_name: String,
    pub category: AssetCategory,
    status: UploadStatus,
    progress_percentage: u8,
    error_message: String,
    pub total_size: u64,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UploadProgress {
    pub fn for_direct_upload(owner: UserId, policy: &DirectUploadPolicy, now: DateTime<Utc>) -> Self {
        let file_name = Path::new(&policy.file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&policy.file_path)
            .to_string();

        let mut metadata = Map::new();
        metadata.insert("content_type".into(), json!(policy.content_type));
        metadata.insert("bucket".into(), json!(policy.bucket));
        metadata.insert("expires_at".into(), json!(policy.expires_at.to_rfc3339()));
        metadata.insert("file_path".into(), json!(policy.file_path));

        Self::pending(owner, file_name, policy.category, policy.max_size_bytes, metadata, now)
    }

    pub fn for_traditional_upload(
        owner: UserId,
        file: &CandidateFile,
        category: AssetCategory,
        now: DateTime<Utc>,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("content_type".into(), json!(file.content_type));
        metadata.insert("upload_method".into(), json!("traditional"));

        Self::pending(owner, file.file_name.clone(), category, file.size_bytes, metadata, now)
    }

    fn pending(
        owner: UserId,
        file_name: String,
        category: AssetCategory,
        total_size: u64,
        metadata: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            file_name,
            category,
            status: UploadStatus::Pending,
            progress_percentage: 0,
            error_message: String::new(),
            total_size,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a persisted record.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        owner: UserId,
        file_name: String,
        category: AssetCategory,
        status: UploadStatus,
        progress_percentage: u8,
        error_message: String,
        total_size: u64,
        metadata: Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            file_name,
            category,
            status,
            progress_percentage: progress_percentage.min(100),
            error_message,
            total_size,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn progress_percentage(&self) -> u8 {
        self.progress_percentage
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records transferred bytes and an optional status change.
    ///
    /// Terminal records are frozen: a plain update is ignored and an explicit
    /// move to another status is rejected. The transition is checked before
    /// anything is written, so a rejected call leaves the record untouched.
    pub fn advance(
        &mut self,
        bytes_uploaded: u64,
        new_status: Option<UploadStatus>,
        error_message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UploadProgressError> {
        if let Some(next) = new_status {
            if next != self.status && !self.status.can_transition_to(next) {
                return Err(UploadProgressError::InvalidStateTransition {
                    from: self.status,
                    to: next,
                });
            }
        }

        if self.status.is_terminal() {
            return Ok(());
        }

        if self.total_size > 0 {
            let pct = (u128::from(bytes_uploaded) * 100 / u128::from(self.total_size)).min(100) as u8;
            self.progress_percentage = self.progress_percentage.max(pct);
        }

        if let Some(next) = new_status {
            self.status = next;
            if next == UploadStatus::Failed {
                self.error_message = error_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Upload failed".to_string());
            }
        }

        self.updated_at = now;
        Ok(())
    }

    /// Where a direct upload was told to put its object. `None` for
    /// traditional uploads or records missing either half of the location.
    pub fn direct_upload_location(&self) -> Option<StorageLocation> {
        let text = |key: &str| {
            self.metadata
                .get(key)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Some(StorageLocation {
            bucket: text("bucket")?,
            key: text("file_path")?,
        })
    }

    pub fn declared_content_type(&self) -> Option<&str> {
        self.metadata.get("content_type").and_then(Value::as_str)
    }

    pub fn to_summary(&self) -> UploadSummary {
        UploadSummary {
            file_name: self.file_name.clone(),
            asset_category: self.category,
            status: self.status,
            progress_percentage: self.progress_percentage,
            error_message: self.error_message.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
