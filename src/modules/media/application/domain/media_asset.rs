use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::{AssetCategory, AssetTypePolicy};
use crate::media::application::ports::outgoing::object_store::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaAssetError {
    #[error("Content type {content_type} is not allowed for {category} assets")]
    InvalidContentType {
        category: AssetCategory,
        content_type: String,
    },

    #[error("File too large (max {max_bytes} bytes, got {actual_bytes} bytes)")]
    FileTooLarge { max_bytes: u64, actual_bytes: u64 },

    #[error("Storage upload failed: {0}")]
    StorageUploadFailed(String),

    #[error("Storage removal failed: {0}")]
    StorageRemovalFailed(String),
}

/// A file offered for upload, described by what the uploader declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl CandidateFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into().trim().to_ascii_lowercase(),
            size_bytes,
        }
    }

    /// Extension including the leading dot, or empty when the name has none.
    pub fn extension(&self) -> String {
        extension_of(&self.file_name)
    }
}

pub(crate) fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Storage key layout shared by traditional and direct uploads.
pub fn storage_key_for(category: AssetCategory, uploaded_at: DateTime<Utc>, extension: &str) -> String {
    format!("{}/{}{}", category, uploaded_at.timestamp(), extension)
}

/// Bucket and key of a stored object. Kept together so one can never be
/// recorded without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    NothingStored,
    Removed,
    Failed(MediaAssetError),
}

#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub category: AssetCategory,
    pub original_file_name: String,
    pub content_type: String,
    pub thumbnail_url: Option<String>,
    pub size_bytes: u64,
    pub duration_seconds: Option<u32>,
    storage: Option<StorageLocation>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl MediaAsset {
    /// Checks a candidate file against the category's rules. Pure.
    pub fn validate(
        file: &CandidateFile,
        category: AssetCategory,
        declared_size: u64,
    ) -> Result<(), MediaAssetError> {
        let rules = AssetTypePolicy::for_category(category);

        if !rules.allows_content_type(&file.content_type) {
            return Err(MediaAssetError::InvalidContentType {
                category,
                content_type: file.content_type.clone(),
            });
        }

        if declared_size > rules.max_size_bytes {
            return Err(MediaAssetError::FileTooLarge {
                max_bytes: rules.max_size_bytes,
                actual_bytes: declared_size,
            });
        }

        Ok(())
    }

    /// Builds a new, not-yet-stored asset after validating the file.
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        category: AssetCategory,
        file: &CandidateFile,
        duration_seconds: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Self, MediaAssetError> {
        Self::validate(file, category, file.size_bytes)?;

        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            category,
            original_file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            thumbnail_url: None,
            size_bytes: file.size_bytes,
            duration_seconds,
            storage: None,
            created_at: now,
            is_active: true,
        })
    }

    /// Catalog entry for an object a client already put at `location`
    /// through a signed URL. The declared size is checked like any upload.
    pub fn from_direct_upload(
        owner: UserId,
        name: impl Into<String>,
        category: AssetCategory,
        file: &CandidateFile,
        duration_seconds: Option<u32>,
        location: StorageLocation,
        now: DateTime<Utc>,
    ) -> Result<Self, MediaAssetError> {
        let mut asset = Self::new(owner, name, category, file, duration_seconds, now)?;
        asset.storage = Some(location);
        Ok(asset)
    }

    /// Rehydrates a persisted asset. `storage` carries bucket and key together.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        owner: UserId,
        name: String,
        category: AssetCategory,
        original_file_name: String,
        content_type: String,
        thumbnail_url: Option<String>,
        size_bytes: u64,
        duration_seconds: Option<u32>,
        storage: Option<StorageLocation>,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            category,
            original_file_name,
            content_type,
            thumbnail_url,
            size_bytes,
            duration_seconds,
            storage,
            created_at,
            is_active,
        }
    }

    pub fn storage(&self) -> Option<&StorageLocation> {
        self.storage.as_ref()
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage.as_ref().map(|s| s.key.as_str())
    }

    /// Assigns `{category}/{unix_ts}{ext}` in `bucket`. A second call keeps
    /// the first location so retried saves never re-upload under a new key.
    pub fn assign_storage_location(&mut self, bucket: &str, now: DateTime<Utc>) -> &StorageLocation {
        let category = self.category;
        let extension = extension_of(&self.original_file_name);

        self.storage.get_or_insert_with(|| StorageLocation {
            bucket: bucket.to_string(),
            key: storage_key_for(category, now, &extension),
        })
    }

    /// Uploads the bytes to the assigned location. On failure the location is
    /// cleared so the asset cannot be persisted pointing at a missing object.
    pub async fn commit<S>(&mut self, store: &S, bytes: Vec<u8>) -> Result<(), MediaAssetError>
    where
        S: ObjectStore + ?Sized,
    {
        let location = self.storage.clone().ok_or_else(|| {
            MediaAssetError::StorageUploadFailed("no storage location assigned".to_string())
        })?;

        match store
            .put(&location.bucket, &location.key, bytes, &self.content_type)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                self.storage = None;
                Err(MediaAssetError::StorageUploadFailed(e.to_string()))
            }
        }
    }

    /// Best-effort removal of the stored object. Never calls the store when
    /// nothing was stored; failures are logged and reported, not raised.
    pub async fn remove<S>(&self, store: &S) -> RemovalOutcome
    where
        S: ObjectStore + ?Sized,
    {
        let Some(location) = self.storage.as_ref() else {
            return RemovalOutcome::NothingStored;
        };

        match store
            .remove(&location.bucket, std::slice::from_ref(&location.key))
            .await
        {
            Ok(()) => RemovalOutcome::Removed,
            Err(e) => {
                tracing::warn!(
                    asset_id = %self.id,
                    bucket = %location.bucket,
                    key = %location.key,
                    error = %e,
                    "Failed to remove stored object, continuing"
                );
                RemovalOutcome::Failed(MediaAssetError::StorageRemovalFailed(e.to_string()))
            }
        }
    }

    // Thumbnail generation for video assets is not implemented yet.
    pub fn thumbnail_source(&self) -> Option<&StorageLocation> {
        match self.category {
            AssetCategory::Video => self.storage.as_ref(),
            _ => None,
        }
    }
}
