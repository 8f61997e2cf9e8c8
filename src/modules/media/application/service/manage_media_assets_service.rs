use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::RemovalOutcome;
use crate::media::application::ports::incoming::use_cases::{
    DeactivateMediaAssetUseCase, DeleteMediaAssetUseCase, ListMediaAssetsUseCase,
    ManageMediaError, MediaAssetView,
};
use crate::media::application::ports::outgoing::db::{
    MediaAssetRepository, MediaAssetRepositoryError,
};
use crate::media::application::ports::outgoing::ObjectStore;

impl From<MediaAssetRepositoryError> for ManageMediaError {
    fn from(err: MediaAssetRepositoryError) -> Self {
        match err {
            MediaAssetRepositoryError::NotFound => ManageMediaError::NotFound,
            other => ManageMediaError::RepositoryError(other.to_string()),
        }
    }
}

pub struct ListMediaAssetsService<A: MediaAssetRepository> {
    assets: A,
}

impl<A: MediaAssetRepository> ListMediaAssetsService<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl<A> ListMediaAssetsUseCase for ListMediaAssetsService<A>
where
    A: MediaAssetRepository + Send + Sync,
{
    async fn execute(&self, owner: UserId) -> Result<Vec<MediaAssetView>, ManageMediaError> {
        let assets = self.assets.list_assets(owner).await?;
        Ok(assets.iter().map(MediaAssetView::from).collect())
    }
}

pub struct DeactivateMediaAssetService<A: MediaAssetRepository> {
    assets: A,
}

impl<A: MediaAssetRepository> DeactivateMediaAssetService<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl<A> DeactivateMediaAssetUseCase for DeactivateMediaAssetService<A>
where
    A: MediaAssetRepository + Send + Sync,
{
    async fn execute(&self, owner: UserId, asset_id: Uuid) -> Result<MediaAssetView, ManageMediaError> {
        let asset = self.assets.deactivate_asset(owner, asset_id).await?;
        Ok(MediaAssetView::from(&asset))
    }
}

pub struct DeleteMediaAssetService<S, A>
where
    S: ObjectStore,
    A: MediaAssetRepository,
{
    store: S,
    assets: A,
}

impl<S, A> DeleteMediaAssetService<S, A>
where
    S: ObjectStore,
    A: MediaAssetRepository,
{
    pub fn new(store: S, assets: A) -> Self {
        Self { store, assets }
    }
}

#[async_trait]
impl<S, A> DeleteMediaAssetUseCase for DeleteMediaAssetService<S, A>
where
    S: ObjectStore + Send + Sync,
    A: MediaAssetRepository + Send + Sync,
{
    async fn execute(&self, owner: UserId, asset_id: Uuid) -> Result<(), ManageMediaError> {
        let asset = self.assets.find_asset(owner, asset_id).await?;

        let outcome = asset.remove(&self.store).await;
        if let RemovalOutcome::Failed(e) = &outcome {
            tracing::warn!(asset_id = %asset_id, error = %e, "Deleting catalog record with orphaned object");
        }

        self.assets.delete_asset(owner, asset_id).await?;

        tracing::info!(asset_id = %asset_id, user_id = %owner, "Media asset deleted");
        Ok(())
    }
}
