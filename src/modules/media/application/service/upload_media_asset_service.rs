use async_trait::async_trait;
use chrono::Utc;

use crate::media::application::domain::policies::StoragePolicy;
use crate::media::application::domain::{
    CandidateFile, MediaAsset, UploadProgress, UploadStatus,
};
use crate::media::application::ports::incoming::use_cases::{
    MediaAssetView, UploadMediaAssetUseCase, UploadMediaCommand, UploadMediaError, UploadedMedia,
};
use crate::media::application::ports::outgoing::db::{
    MediaAssetRepository, UploadProgressRepository,
};
use crate::media::application::ports::outgoing::ObjectStore;
use crate::media::application::service::tracked_upload::{TrackError, TrackedUpload};

/// Traditional upload: validate, track, store, then catalog.
///
/// Validation runs before anything is written. Once the progress record
/// exists, every failure path marks it `failed` and undoes what was stored.
pub struct UploadMediaAssetService<S, A, P>
where
    S: ObjectStore,
    A: MediaAssetRepository,
    P: UploadProgressRepository,
{
    store: S,
    assets: A,
    progress: P,
    policy: StoragePolicy,
}

impl<S, A, P> UploadMediaAssetService<S, A, P>
where
    S: ObjectStore,
    A: MediaAssetRepository,
    P: UploadProgressRepository,
{
    pub fn new(store: S, assets: A, progress: P, policy: StoragePolicy) -> Self {
        Self {
            store,
            assets,
            progress,
            policy,
        }
    }
}

fn tracking_failed(err: TrackError) -> UploadMediaError {
    UploadMediaError::RepositoryError(err.to_string())
}

#[async_trait]
impl<S, A, P> UploadMediaAssetUseCase for UploadMediaAssetService<S, A, P>
where
    S: ObjectStore + Send + Sync,
    A: MediaAssetRepository + Send + Sync,
    P: UploadProgressRepository + Send + Sync,
{
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError> {
        let now = Utc::now();
        let owner = command.owner();
        let category = command.category();
        let file = CandidateFile::new(
            command.file_name(),
            command.content_type(),
            command.size_bytes(),
        );
        let size = file.size_bytes;

        let mut asset = MediaAsset::new(
            owner,
            command.name(),
            category,
            &file,
            command.duration_seconds(),
            now,
        )?;

        let fresh = UploadProgress::for_traditional_upload(owner, &file, category, now);
        let mut tracker = TrackedUpload::start(&self.progress, fresh)
            .await
            .map_err(tracking_failed)?;
        let upload_id = tracker.get().id;

        if let Err(e) = tracker.step(0, UploadStatus::Uploading).await {
            tracker.fail(e.to_string()).await;
            return Err(tracking_failed(e));
        }

        asset.assign_storage_location(&self.policy.bucket_name, now);

        if let Err(e) = asset.commit(&self.store, command.into_bytes()).await {
            tracing::error!(%upload_id, user_id = %owner, error = %e, "Object store upload failed");
            tracker.fail(e.to_string()).await;
            return Err(e.into());
        }

        if let Err(e) = tracker.step(size, UploadStatus::Processing).await {
            asset.remove(&self.store).await;
            tracker.fail(e.to_string()).await;
            return Err(tracking_failed(e));
        }

        let recorded = match self.assets.record_asset(&asset).await {
            Ok(recorded) => recorded,
            Err(e) => {
                tracing::error!(
                    %upload_id,
                    asset_id = %asset.id,
                    error = %e,
                    "Failed to record media asset, removing stored object"
                );
                asset.remove(&self.store).await;
                tracker.fail(e.to_string()).await;
                return Err(UploadMediaError::RepositoryError(e.to_string()));
            }
        };

        // The catalog entry only stands once the upload is recorded as completed.
        if let Err(e) = tracker.step(size, UploadStatus::Completed).await {
            tracing::error!(%upload_id, asset_id = %asset.id, error = %e, "Could not complete upload, rolling back");
            if let Err(del) = self.assets.delete_asset(owner, asset.id).await {
                tracing::error!(asset_id = %asset.id, error = %del, "Rollback of catalog entry failed");
            }
            asset.remove(&self.store).await;
            tracker.fail(e.to_string()).await;
            return Err(tracking_failed(e));
        }

        tracing::info!(
            asset_id = %recorded.id,
            %upload_id,
            user_id = %owner,
            category = %category,
            size_bytes = size,
            "Media asset uploaded"
        );

        Ok(UploadedMedia {
            upload_id,
            asset: MediaAssetView::from(&recorded),
            upload: tracker.get().to_summary(),
        })
    }
}
