use async_trait::async_trait;
use uuid::Uuid;

use super::media_command::MediaAssetView;
use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManageMediaError {
    #[error("Media asset not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListMediaAssetsUseCase: Send + Sync {
    async fn execute(&self, owner: UserId) -> Result<Vec<MediaAssetView>, ManageMediaError>;
}

#[async_trait]
pub trait DeactivateMediaAssetUseCase: Send + Sync {
    async fn execute(&self, owner: UserId, asset_id: Uuid)
        -> Result<MediaAssetView, ManageMediaError>;
}

/// Hard delete. Removing the stored object is best-effort; the catalog
/// record is always removed.
#[async_trait]
pub trait DeleteMediaAssetUseCase: Send + Sync {
    async fn execute(&self, owner: UserId, asset_id: Uuid) -> Result<(), ManageMediaError>;
}
