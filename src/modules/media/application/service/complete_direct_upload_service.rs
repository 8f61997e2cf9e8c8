use async_trait::async_trait;
use chrono::Utc;

use crate::media::application::domain::{
    CandidateFile, MediaAsset, StorageLocation, UploadStatus,
};
use crate::media::application::ports::incoming::use_cases::{
    CompleteDirectUploadCommand, CompleteDirectUploadError, CompleteDirectUploadUseCase,
    MediaAssetView, UploadedMedia,
};
use crate::media::application::ports::outgoing::db::{
    MediaAssetRepository, UploadProgressRepository, UploadProgressRepositoryError,
};
use crate::media::application::ports::outgoing::ObjectStore;
use crate::media::application::service::tracked_upload::{TrackError, TrackedUpload};

/// Second half of a direct upload: catalog the object the client put
/// through the signed URL and close the progress record.
///
/// Anything that fails after the object is accepted as ours removes it and
/// marks the record `failed`, same as a traditional upload.
pub struct CompleteDirectUploadService<S, A, P>
where
    S: ObjectStore,
    A: MediaAssetRepository,
    P: UploadProgressRepository,
{
    store: S,
    assets: A,
    progress: P,
}

impl<S, A, P> CompleteDirectUploadService<S, A, P>
where
    S: ObjectStore,
    A: MediaAssetRepository,
    P: UploadProgressRepository,
{
    pub fn new(store: S, assets: A, progress: P) -> Self {
        Self {
            store,
            assets,
            progress,
        }
    }

    async fn discard(&self, location: &StorageLocation) {
        if let Err(e) = self
            .store
            .remove(&location.bucket, std::slice::from_ref(&location.key))
            .await
        {
            tracing::warn!(
                bucket = %location.bucket,
                key = %location.key,
                error = %e,
                "Failed to remove rejected direct upload, continuing"
            );
        }
    }
}

fn tracking_failed(err: TrackError) -> CompleteDirectUploadError {
    match err {
        TrackError::Store(UploadProgressRepositoryError::Conflict) => CompleteDirectUploadError::Conflict,
        TrackError::Store(UploadProgressRepositoryError::NotFound) => CompleteDirectUploadError::NotFound,
        other => CompleteDirectUploadError::RepositoryError(other.to_string()),
    }
}

#[async_trait]
impl<S, A, P> CompleteDirectUploadUseCase for CompleteDirectUploadService<S, A, P>
where
    S: ObjectStore + Send + Sync,
    A: MediaAssetRepository + Send + Sync,
    P: UploadProgressRepository + Send + Sync,
{
    async fn execute(
        &self,
        command: CompleteDirectUploadCommand,
    ) -> Result<UploadedMedia, CompleteDirectUploadError> {
        let owner = command.owner();
        let upload_id = command.upload_id();
        let size = command.size_bytes();

        let current = self
            .progress
            .find_progress(owner, upload_id)
            .await
            .map_err(|e| match e {
                UploadProgressRepositoryError::NotFound => CompleteDirectUploadError::NotFound,
                other => CompleteDirectUploadError::RepositoryError(other.to_string()),
            })?;

        let location = current
            .direct_upload_location()
            .ok_or(CompleteDirectUploadError::NotDirectUpload)?;
        if current.status().is_terminal() {
            return Err(CompleteDirectUploadError::AlreadyFinished(current.status()));
        }

        let file = CandidateFile::new(
            current.file_name.clone(),
            current.declared_content_type().unwrap_or_default(),
            size,
        );
        let category = current.category;
        let declared_total = current.total_size;
        let mut tracker = TrackedUpload::resume(&self.progress, current);

        let asset = match MediaAsset::from_direct_upload(
            owner,
            command.name(),
            category,
            &file,
            command.duration_seconds(),
            location.clone(),
            Utc::now(),
        ) {
            Ok(asset) => asset,
            Err(e) => {
                tracing::warn!(%upload_id, user_id = %owner, error = %e, "Direct upload rejected");
                self.discard(&location).await;
                tracker.fail(e.to_string()).await;
                return Err(e.into());
            }
        };

        if let Err(e) = tracker.step_to(size, UploadStatus::Processing).await {
            if !matches!(e, TrackError::Store(UploadProgressRepositoryError::Conflict)) {
                asset.remove(&self.store).await;
                tracker.fail(e.to_string()).await;
            }
            return Err(tracking_failed(e));
        }

        let recorded = match self.assets.record_asset(&asset).await {
            Ok(recorded) => recorded,
            Err(e) => {
                tracing::error!(
                    %upload_id,
                    asset_id = %asset.id,
                    error = %e,
                    "Failed to record direct upload, removing stored object"
                );
                asset.remove(&self.store).await;
                tracker.fail(e.to_string()).await;
                return Err(CompleteDirectUploadError::RepositoryError(e.to_string()));
            }
        };

        if let Err(e) = tracker.step(declared_total, UploadStatus::Completed).await {
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
            "Direct upload completed"
        );

        Ok(UploadedMedia {
            upload_id,
            asset: MediaAssetView::from(&recorded),
            upload: tracker.get().to_summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::media::application::domain::policies::AssetCategory;
    use crate::media::application::domain::{DirectUploadPolicy, UploadProgress};
    use crate::media::application::ports::outgoing::db::MediaAssetRepositoryError;
    use crate::media::application::service::test_doubles::{
        FakeStore, InMemoryAssets, InMemoryProgress,
    };
    use uuid::Uuid;

    const MIB: u64 = 1024 * 1024;

    fn direct(owner: UserId) -> UploadProgress {
        let policy = DirectUploadPolicy {
            file_path: "video/1700000000.mp4".to_string(),
            category: AssetCategory::Video,
            max_size_bytes: 100 * MIB,
            content_type: "video/mp4".to_string(),
            bucket: "bucket-test".to_string(),
            expires_at: Utc::now() + chrono::Duration::minutes(15),
            upload_url: "https://storage.test/bucket-test/video/1700000000.mp4?sig=abc".to_string(),
        };
        UploadProgress::for_direct_upload(owner, &policy, Utc::now())
    }

    fn command(owner: UserId, upload_id: Uuid, size: u64) -> CompleteDirectUploadCommand {
        CompleteDirectUploadCommand::new(owner, upload_id, "Morning stretch".into(), size, Some(300))
            .unwrap()
    }

    fn service(
        store: FakeStore,
        assets: InMemoryAssets,
        progress: InMemoryProgress,
    ) -> CompleteDirectUploadService<FakeStore, InMemoryAssets, InMemoryProgress> {
        CompleteDirectUploadService::new(store, assets, progress)
    }

    #[tokio::test]
    async fn test_complete_records_asset_at_signed_location() {
        let owner = UserId::from(Uuid::new_v4());
        let tracker = direct(owner);
        let upload_id = tracker.id;
        let store = FakeStore::default();
        let assets = InMemoryAssets::default();
        let progress = InMemoryProgress::with(tracker);
        let svc = service(store.clone(), assets.clone(), progress.clone());

        let result = svc.execute(command(owner, upload_id, 20 * MIB)).await.unwrap();

        assert_eq!(result.upload_id, upload_id);
        assert_eq!(result.asset.name, "Morning stretch");
        assert_eq!(result.asset.bucket.as_deref(), Some("bucket-test"));
        assert_eq!(result.asset.storage_key.as_deref(), Some("video/1700000000.mp4"));
        assert_eq!(result.asset.size_bytes, 20 * MIB);
        assert_eq!(result.upload.status, UploadStatus::Completed);
        assert_eq!(result.upload.progress_percentage, 100);
        assert_eq!(
            progress.statuses(),
            vec![
                UploadStatus::Pending,
                UploadStatus::Uploading,
                UploadStatus::Processing,
                UploadStatus::Completed
            ]
        );
        assert_eq!(assets.assets.lock().unwrap().len(), 1);
        assert!(store.puts.lock().unwrap().is_empty());
        assert!(store.removes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_unknown_upload_is_not_found() {
        let owner = UserId::from(Uuid::new_v4());
        let svc = service(FakeStore::default(), InMemoryAssets::default(), InMemoryProgress::default());

        let err = svc.execute(command(owner, Uuid::new_v4(), MIB)).await.unwrap_err();

        assert_eq!(err, CompleteDirectUploadError::NotFound);
    }

    #[tokio::test]
    async fn test_complete_traditional_upload_is_rejected() {
        let owner = UserId::from(Uuid::new_v4());
        let file = CandidateFile::new("waves.mp3", "audio/mpeg", 10);
        let tracker = UploadProgress::for_traditional_upload(owner, &file, AssetCategory::Audio, Utc::now());
        let upload_id = tracker.id;
        let svc = service(FakeStore::default(), InMemoryAssets::default(), InMemoryProgress::with(tracker));

        let err = svc.execute(command(owner, upload_id, 10)).await.unwrap_err();

        assert_eq!(err, CompleteDirectUploadError::NotDirectUpload);
    }

    #[tokio::test]
    async fn test_complete_twice_reports_already_finished() {
        let owner = UserId::from(Uuid::new_v4());
        let tracker = direct(owner);
        let upload_id = tracker.id;
        let assets = InMemoryAssets::default();
        let svc = service(FakeStore::default(), assets.clone(), InMemoryProgress::with(tracker));

        svc.execute(command(owner, upload_id, MIB)).await.unwrap();
        let err = svc.execute(command(owner, upload_id, MIB)).await.unwrap_err();

        assert_eq!(err, CompleteDirectUploadError::AlreadyFinished(UploadStatus::Completed));
        assert_eq!(assets.assets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_oversized_object_is_removed_and_failed() {
        let owner = UserId::from(Uuid::new_v4());
        let tracker = direct(owner);
        let upload_id = tracker.id;
        let store = FakeStore::default();
        let assets = InMemoryAssets::default();
        let progress = InMemoryProgress::with(tracker);
        let svc = service(store.clone(), assets.clone(), progress.clone());

        let err = svc.execute(command(owner, upload_id, 600 * MIB)).await.unwrap_err();

        assert!(matches!(err, CompleteDirectUploadError::FileTooLarge { .. }));
        assert!(assets.assets.lock().unwrap().is_empty());
        assert_eq!(
            store.removes.lock().unwrap().clone(),
            vec![("bucket-test".to_string(), vec!["video/1700000000.mp4".to_string()])]
        );
        assert_eq!(progress.latest().unwrap().status(), UploadStatus::Failed);
    }

    #[tokio::test]
    async fn test_complete_catalog_failure_removes_object() {
        let owner = UserId::from(Uuid::new_v4());
        let tracker = direct(owner);
        let upload_id = tracker.id;
        let store = FakeStore::default();
        let assets = InMemoryAssets {
            fail_record: Some(MediaAssetRepositoryError::DatabaseError("disk full".into())),
            ..Default::default()
        };
        let progress = InMemoryProgress::with(tracker);
        let svc = service(store.clone(), assets, progress.clone());

        let err = svc.execute(command(owner, upload_id, MIB)).await.unwrap_err();

        assert!(matches!(err, CompleteDirectUploadError::RepositoryError(_)));
        assert_eq!(store.removes.lock().unwrap().len(), 1);
        assert_eq!(progress.latest().unwrap().status(), UploadStatus::Failed);
    }

    #[tokio::test]
    async fn test_complete_final_write_failure_rolls_back() {
        let owner = UserId::from(Uuid::new_v4());
        let tracker = direct(owner);
        let upload_id = tracker.id;
        let store = FakeStore::default();
        let assets = InMemoryAssets::default();
        let progress = InMemoryProgress {
            fail_save_on: Some(UploadStatus::Completed),
            ..InMemoryProgress::with(tracker)
        };
        let svc = service(store.clone(), assets.clone(), progress.clone());

        let err = svc.execute(command(owner, upload_id, MIB)).await.unwrap_err();

        assert!(matches!(err, CompleteDirectUploadError::RepositoryError(_)));
        assert!(assets.assets.lock().unwrap().is_empty());
        assert_eq!(store.removes.lock().unwrap().len(), 1);
        assert_eq!(progress.latest().unwrap().status(), UploadStatus::Failed);
    }
}
