use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::media::application::domain::policies::{AssetCategory, UnknownCategory};
use crate::media::application::domain::MediaAsset;

pub const MAX_FILE_NAME_LEN: usize = 255;
pub const MAX_ASSET_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaCommandError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid file name")]
    InvalidFileName,

    #[error("Name must be at most {} characters", MAX_ASSET_NAME_LEN)]
    NameTooLong,

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Accepts a bare file name only: no directories, no control characters.
pub fn sanitize_basename(file_name: &str) -> Result<String, MediaCommandError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(MediaCommandError::MissingField("file_name"));
    }

    let base = Path::new(trimmed)
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or(MediaCommandError::InvalidFileName)?;

    if base != trimmed || base.len() > MAX_FILE_NAME_LEN {
        return Err(MediaCommandError::InvalidFileName);
    }

    if base.chars().any(|c| c.is_control()) {
        return Err(MediaCommandError::InvalidFileName);
    }

    Ok(base.to_string())
}

pub fn required(value: String, field: &'static str) -> Result<String, MediaCommandError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(MediaCommandError::MissingField(field));
    }
    Ok(value)
}

pub fn parse_category(raw: &str) -> Result<AssetCategory, MediaCommandError> {
    Ok(raw.parse::<AssetCategory>()?)
}

/// Read model of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaAssetView {
    pub id: Uuid,
    pub name: String,
    pub category: AssetCategory,
    pub original_file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub bucket: Option<String>,
    pub storage_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&MediaAsset> for MediaAssetView {
    fn from(asset: &MediaAsset) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            category: asset.category,
            original_file_name: asset.original_file_name.clone(),
            content_type: asset.content_type.clone(),
            size_bytes: asset.size_bytes,
            duration_seconds: asset.duration_seconds,
            thumbnail_url: asset.thumbnail_url.clone(),
            bucket: asset.storage().map(|s| s.bucket.clone()),
            storage_key: asset.storage().map(|s| s.key.clone()),
            created_at: asset.created_at,
            is_active: asset.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basename_accepts_plain_name() {
        assert_eq!(sanitize_basename(" clip.mp4 ").unwrap(), "clip.mp4");
    }

    #[test]
    fn test_sanitize_basename_rejects_paths() {
        assert_eq!(
            sanitize_basename("../etc/passwd"),
            Err(MediaCommandError::InvalidFileName)
        );
        assert_eq!(
            sanitize_basename("dir/clip.mp4"),
            Err(MediaCommandError::InvalidFileName)
        );
    }

    #[test]
    fn test_sanitize_basename_rejects_control_chars() {
        assert_eq!(
            sanitize_basename("cl\u{0007}ip.mp4"),
            Err(MediaCommandError::InvalidFileName)
        );
    }

    #[test]
    fn test_sanitize_basename_rejects_empty() {
        assert_eq!(
            sanitize_basename("   "),
            Err(MediaCommandError::MissingField("file_name"))
        );
    }

    #[test]
    fn test_sanitize_basename_rejects_too_long() {
        let long = format!("{}.png", "a".repeat(MAX_FILE_NAME_LEN));
        assert_eq!(sanitize_basename(&long), Err(MediaCommandError::InvalidFileName));
    }

    #[test]
    fn test_parse_category_unknown() {
        assert!(matches!(
            parse_category("pdf"),
            Err(MediaCommandError::UnknownCategory(_))
        ));
    }
}
