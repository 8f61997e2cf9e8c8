use chrono::Utc;

use crate::media::application::domain::{UploadProgress, UploadProgressError, UploadStatus};
use crate::media::application::ports::outgoing::db::{
    UploadProgressRepository, UploadProgressRepositoryError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum TrackError {
    #[error(transparent)]
    Transition(#[from] UploadProgressError),

    #[error(transparent)]
    Store(#[from] UploadProgressRepositoryError),
}

/// Progress record owned by one running upload.
///
/// Each step is applied to a copy and persisted with a guard on the status
/// it was read with; the copy is adopted only once the write lands. A failed
/// write leaves the tracker where it was, so it can still be marked failed.
pub(crate) struct TrackedUpload<'a, P: UploadProgressRepository> {
    repo: &'a P,
    current: UploadProgress,
}

impl<'a, P: UploadProgressRepository> TrackedUpload<'a, P> {
    pub(crate) fn resume(repo: &'a P, current: UploadProgress) -> Self {
        Self { repo, current }
    }

    pub(crate) async fn start(repo: &'a P, fresh: UploadProgress) -> Result<Self, TrackError> {
        repo.record_progress(&fresh).await?;
        Ok(Self::resume(repo, fresh))
    }

    pub(crate) fn get(&self) -> &UploadProgress {
        &self.current
    }

    pub(crate) async fn step(&mut self, bytes: u64, status: UploadStatus) -> Result<(), TrackError> {
        let mut next = self.current.clone();
        next.advance(bytes, Some(status), None, Utc::now())?;
        self.repo.save_progress(&next, self.current.status()).await?;
        self.current = next;
        Ok(())
    }

    /// Walks the remaining forward steps up to `target`, recording `bytes`.
    pub(crate) async fn step_to(&mut self, bytes: u64, target: UploadStatus) -> Result<(), TrackError> {
        const PATH: [UploadStatus; 3] = [
            UploadStatus::Uploading,
            UploadStatus::Processing,
            UploadStatus::Completed,
        ];

        for status in PATH {
            if self.current.status() == target {
                break;
            }
            if self.current.status().can_transition_to(status) {
                self.step(bytes, status).await?;
            }
        }

        if self.current.status() != target {
            return Err(UploadProgressError::InvalidStateTransition {
                from: self.current.status(),
                to: target,
            }
            .into());
        }
        Ok(())
    }

    /// Best effort: problems are logged, the caller is already failing.
    pub(crate) async fn fail(&mut self, message: impl Into<String>) {
        let mut next = self.current.clone();
        if let Err(e) = next.advance(0, Some(UploadStatus::Failed), Some(message.into()), Utc::now()) {
            tracing::warn!(upload_id = %self.current.id, error = %e, "Could not mark upload failed");
            return;
        }

        match self.repo.save_progress(&next, self.current.status()).await {
            Ok(()) => self.current = next,
            Err(e) => {
                tracing::error!(upload_id = %self.current.id, error = %e, "Failed to persist failed upload")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::media::application::domain::policies::AssetCategory;
    use crate::media::application::domain::CandidateFile;
    use crate::media::application::service::test_doubles::InMemoryProgress;
    use uuid::Uuid;

    fn fresh() -> UploadProgress {
        let file = CandidateFile::new("tide.wav", "audio/wav", 100);
        UploadProgress::for_traditional_upload(
            UserId::from(Uuid::new_v4()),
            &file,
            AssetCategory::Audio,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_rejected_write_keeps_tracker_open_for_failure() {
        let repo = InMemoryProgress {
            fail_save_on: Some(UploadStatus::Uploading),
            ..Default::default()
        };
        let mut tracked = TrackedUpload::start(&repo, fresh()).await.unwrap();

        assert!(tracked.step(0, UploadStatus::Uploading).await.is_err());
        assert_eq!(tracked.get().status(), UploadStatus::Pending);

        tracked.fail("store down").await;
        assert_eq!(tracked.get().status(), UploadStatus::Failed);
        assert_eq!(repo.latest().unwrap().status(), UploadStatus::Failed);
    }

    #[tokio::test]
    async fn test_step_to_walks_remaining_states() {
        let repo = InMemoryProgress::default();
        let mut tracked = TrackedUpload::start(&repo, fresh()).await.unwrap();

        tracked.step_to(100, UploadStatus::Processing).await.unwrap();

        assert_eq!(
            repo.statuses(),
            vec![UploadStatus::Pending, UploadStatus::Uploading, UploadStatus::Processing]
        );
        assert_eq!(tracked.get().progress_percentage(), 100);
    }

    #[tokio::test]
    async fn test_stale_tracker_cannot_overwrite_terminal_row() {
        let repo = InMemoryProgress::default();
        let p = fresh();
        let mut first = TrackedUpload::start(&repo, p.clone()).await.unwrap();
        let mut second = TrackedUpload::resume(&repo, p);

        first.fail("client gave up").await;
        let err = second.step(50, UploadStatus::Uploading).await.unwrap_err();

        assert_eq!(err, TrackError::Store(UploadProgressRepositoryError::Conflict));
        assert_eq!(repo.latest().unwrap().status(), UploadStatus::Failed);
    }
}
