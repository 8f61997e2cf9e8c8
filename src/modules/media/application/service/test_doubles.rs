//! In-memory ports shared by the service tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::{MediaAsset, UploadProgress, UploadStatus};
use crate::media::application::ports::outgoing::db::{
    MediaAssetRepository, MediaAssetRepositoryError, UploadProgressRepository,
    UploadProgressRepositoryError,
};
use crate::media::application::ports::outgoing::{ObjectStore, ObjectStoreError};

#[derive(Clone, Default)]
pub struct FakeStore {
    pub fail_put: Option<ObjectStoreError>,
    pub fail_remove: Option<ObjectStoreError>,
    pub fail_sign: Option<ObjectStoreError>,
    pub puts: Arc<Mutex<Vec<(String, String, usize, String)>>>,
    pub removes: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    pub signs: Arc<Mutex<Vec<(String, String, String, Duration)>>>,
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        self.puts.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        self.fail_put.clone().map_or(Ok(()), Err)
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), ObjectStoreError> {
        self.removes
            .lock()
            .unwrap()
            .push((bucket.to_string(), keys.to_vec()));
        self.fail_remove.clone().map_or(Ok(()), Err)
    }

    async fn sign_upload_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, ObjectStoreError> {
        self.signs.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            content_type.to_string(),
            ttl,
        ));
        match &self.fail_sign {
            Some(e) => Err(e.clone()),
            None => Ok(format!("https://storage.test/{bucket}/{key}?sig=abc")),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAssets {
    pub fail_record: Option<MediaAssetRepositoryError>,
    pub assets: Arc<Mutex<HashMap<Uuid, MediaAsset>>>,
}

impl InMemoryAssets {
    pub fn with(asset: MediaAsset) -> Self {
        let repo = Self::default();
        repo.assets.lock().unwrap().insert(asset.id, asset);
        repo
    }
}

#[async_trait]
impl MediaAssetRepository for InMemoryAssets {
    async fn record_asset(&self, asset: &MediaAsset) -> Result<MediaAsset, MediaAssetRepositoryError> {
        if let Some(e) = &self.fail_record {
            return Err(e.clone());
        }
        self.assets.lock().unwrap().insert(asset.id, asset.clone());
        Ok(asset.clone())
    }

    async fn find_asset(&self, owner: UserId, asset_id: Uuid) -> Result<MediaAsset, MediaAssetRepositoryError> {
        self.assets
            .lock()
            .unwrap()
            .get(&asset_id)
            .filter(|a| a.owner == owner)
            .cloned()
            .ok_or(MediaAssetRepositoryError::NotFound)
    }

    async fn list_assets(&self, owner: UserId) -> Result<Vec<MediaAsset>, MediaAssetRepositoryError> {
        let mut list: Vec<MediaAsset> = self
            .assets
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.owner == owner && a.is_active)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn deactivate_asset(
        &self,
        owner: UserId,
        asset_id: Uuid,
    ) -> Result<MediaAsset, MediaAssetRepositoryError> {
        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .get_mut(&asset_id)
            .filter(|a| a.owner == owner)
            .ok_or(MediaAssetRepositoryError::NotFound)?;
        asset.is_active = false;
        Ok(asset.clone())
    }

    async fn delete_asset(&self, owner: UserId, asset_id: Uuid) -> Result<(), MediaAssetRepositoryError> {
        let mut assets = self.assets.lock().unwrap();
        match assets.get(&asset_id) {
            Some(a) if a.owner == owner => {
                assets.remove(&asset_id);
                Ok(())
            }
            _ => Err(MediaAssetRepositoryError::NotFound),
        }
    }
}

/// Keeps every saved snapshot so tests can assert the order of writes.
/// Saves apply the same guard as the database: the latest snapshot must
/// still have the expected status and must not be terminal.
#[derive(Clone, Default)]
pub struct InMemoryProgress {
    pub history: Arc<Mutex<Vec<UploadProgress>>>,
    /// Fails any save that would write this status.
    pub fail_save_on: Option<UploadStatus>,
}

impl InMemoryProgress {
    pub fn with(progress: UploadProgress) -> Self {
        let repo = Self::default();
        repo.history.lock().unwrap().push(progress);
        repo
    }

    pub fn latest(&self) -> Option<UploadProgress> {
        self.history.lock().unwrap().last().cloned()
    }

    pub fn statuses(&self) -> Vec<UploadStatus> {
        self.history.lock().unwrap().iter().map(|p| p.status()).collect()
    }
}

#[async_trait]
impl UploadProgressRepository for InMemoryProgress {
    async fn record_progress(&self, progress: &UploadProgress) -> Result<(), UploadProgressRepositoryError> {
        self.history.lock().unwrap().push(progress.clone());
        Ok(())
    }

    async fn find_progress(
        &self,
        owner: UserId,
        upload_id: Uuid,
    ) -> Result<UploadProgress, UploadProgressRepositoryError> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|p| p.id == upload_id && p.owner == owner)
            .cloned()
            .ok_or(UploadProgressRepositoryError::NotFound)
    }

    async fn save_progress(
        &self,
        progress: &UploadProgress,
        expected: UploadStatus,
    ) -> Result<(), UploadProgressRepositoryError> {
        if self.fail_save_on == Some(progress.status()) {
            return Err(UploadProgressRepositoryError::DatabaseError("write refused".into()));
        }

        let mut history = self.history.lock().unwrap();
        let stored = history
            .iter()
            .rev()
            .find(|p| p.id == progress.id && p.owner == progress.owner)
            .ok_or(UploadProgressRepositoryError::NotFound)?;

        if stored.status() != expected
            || stored.status().is_terminal()
            || stored.progress_percentage() > progress.progress_percentage()
        {
            return Err(UploadProgressRepositoryError::Conflict);
        }

        history.push(progress.clone());
        Ok(())
    }
}
