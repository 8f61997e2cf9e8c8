use async_trait::async_trait;
use chrono::Utc;

use crate::media::application::domain::policies::{AssetTypePolicy, StoragePolicy};
use crate::media::application::domain::{
    storage_key_for, DirectUploadPolicy, MediaAsset, MediaAssetError, UploadProgress,
};
use crate::media::application::ports::incoming::use_cases::{
    DirectUploadTicket, InitDirectUploadCommand, InitDirectUploadError, InitDirectUploadUseCase,
};
use crate::media::application::ports::outgoing::db::UploadProgressRepository;
use crate::media::application::ports::outgoing::ObjectStore;

pub struct InitDirectUploadService<S, P>
where
    S: ObjectStore,
    P: UploadProgressRepository,
{
    store: S,
    progress: P,
    policy: StoragePolicy,
}

impl<S, P> InitDirectUploadService<S, P>
where
    S: ObjectStore,
    P: UploadProgressRepository,
{
    pub fn new(store: S, progress: P, policy: StoragePolicy) -> Self {
        Self {
            store,
            progress,
            policy,
        }
    }
}

#[async_trait]
impl<S, P> InitDirectUploadUseCase for InitDirectUploadService<S, P>
where
    S: ObjectStore + Send + Sync,
    P: UploadProgressRepository + Send + Sync,
{
    async fn execute(
        &self,
        command: InitDirectUploadCommand,
    ) -> Result<DirectUploadTicket, InitDirectUploadError> {
        let category = command.category();
        let file = command.file();

        // Size is unknown until the client uploads; only the type can be checked here.
        if let Err(MediaAssetError::InvalidContentType {
            category,
            content_type,
        }) = MediaAsset::validate(file, category, 0)
        {
            return Err(InitDirectUploadError::InvalidContentType {
                category,
                content_type,
            });
        }

        let rules = AssetTypePolicy::for_category(category);
        let now = Utc::now();
        let file_path = storage_key_for(category, now, &file.extension());
        let ttl = self.policy.direct_upload_ttl;

        let upload_url = self
            .store
            .sign_upload_url(&self.policy.bucket_name, &file_path, &file.content_type, ttl)
            .await
            .map_err(|e| InitDirectUploadError::StorageError(e.to_string()))?;

        let policy = DirectUploadPolicy {
            file_path,
            category,
            max_size_bytes: rules.max_size_bytes,
            content_type: file.content_type.clone(),
            bucket: self.policy.bucket_name.clone(),
            expires_at: now + chrono::Duration::seconds(ttl.as_secs() as i64),
            upload_url,
        };

        let tracker = UploadProgress::for_direct_upload(command.owner(), &policy, now);
        self.progress
            .record_progress(&tracker)
            .await
            .map_err(|e| InitDirectUploadError::RepositoryError(e.to_string()))?;

        tracing::info!(
            upload_id = %tracker.id,
            user_id = %command.owner(),
            file_path = %policy.file_path,
            "Direct upload initialized"
        );

        Ok(DirectUploadTicket {
            upload_id: tracker.id,
            upload_url: policy.upload_url,
            file_path: policy.file_path,
            bucket: policy.bucket,
            content_type: policy.content_type,
            max_size_bytes: policy.max_size_bytes,
            expires_at: policy.expires_at,
        })
    }
}
