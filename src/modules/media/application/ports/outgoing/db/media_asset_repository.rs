use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::MediaAsset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaAssetRepositoryError {
    #[error("Media asset not found")]
    NotFound,

    #[error("Storage location already recorded for another asset")]
    DuplicateStorageLocation,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Catalog of media assets. Every operation is scoped to the owning instructor.
#[async_trait]
pub trait MediaAssetRepository: Send + Sync {
    async fn record_asset(&self, asset: &MediaAsset) -> Result<MediaAsset, MediaAssetRepositoryError>;

    async fn find_asset(&self, owner: UserId, asset_id: Uuid)
        -> Result<MediaAsset, MediaAssetRepositoryError>;

    /// Active assets only, newest first.
    async fn list_assets(&self, owner: UserId) -> Result<Vec<MediaAsset>, MediaAssetRepositoryError>;

    async fn deactivate_asset(
        &self,
        owner: UserId,
        asset_id: Uuid,
    ) -> Result<MediaAsset, MediaAssetRepositoryError>;

    async fn delete_asset(&self, owner: UserId, asset_id: Uuid) -> Result<(), MediaAssetRepositoryError>;
}
