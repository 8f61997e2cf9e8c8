use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::UploadSummary;
use crate::media::application::ports::incoming::use_cases::{
    AdvanceUploadCommand, AdvanceUploadError, AdvanceUploadUseCase, GetUploadProgressError,
    GetUploadProgressUseCase,
};
use crate::media::application::ports::outgoing::db::{
    UploadProgressRepository, UploadProgressRepositoryError,
};

pub struct GetUploadProgressService<P: UploadProgressRepository> {
    progress: P,
}

impl<P: UploadProgressRepository> GetUploadProgressService<P> {
    pub fn new(progress: P) -> Self {
        Self { progress }
    }
}

#[async_trait]
impl<P> GetUploadProgressUseCase for GetUploadProgressService<P>
where
    P: UploadProgressRepository + Send + Sync,
{
    async fn execute(
        &self,
        owner: UserId,
        upload_id: Uuid,
    ) -> Result<UploadSummary, GetUploadProgressError> {
        self.progress
            .find_progress(owner, upload_id)
            .await
            .map(|p| p.to_summary())
            .map_err(|e| match e {
                UploadProgressRepositoryError::NotFound => GetUploadProgressError::NotFound,
                other => GetUploadProgressError::RepositoryError(other.to_string()),
            })
    }
}

pub struct AdvanceUploadService<P: UploadProgressRepository> {
    progress: P,
}

impl<P: UploadProgressRepository> AdvanceUploadService<P> {
    pub fn new(progress: P) -> Self {
        Self { progress }
    }
}

#[async_trait]
impl<P> AdvanceUploadUseCase for AdvanceUploadService<P>
where
    P: UploadProgressRepository + Send + Sync,
{
    async fn execute(&self, command: AdvanceUploadCommand) -> Result<UploadSummary, AdvanceUploadError> {
        let mut tracker = self
            .progress
            .find_progress(command.owner, command.upload_id)
            .await
            .map_err(advance_error)?;

        let before = tracker.status();
        tracker.advance(
            command.bytes_uploaded,
            command.status,
            command.error_message,
            Utc::now(),
        )?;

        // Terminal records are frozen; there is nothing to write.
        if before.is_terminal() {
            return Ok(tracker.to_summary());
        }

        self.progress
            .save_progress(&tracker, before)
            .await
            .map_err(advance_error)?;

        if before != tracker.status() {
            tracing::info!(
                upload_id = %tracker.id,
                from = %before,
                to = %tracker.status(),
                "Upload status changed"
            );
        }

        Ok(tracker.to_summary())
    }
}

fn advance_error(err: UploadProgressRepositoryError) -> AdvanceUploadError {
    match err {
        UploadProgressRepositoryError::NotFound => AdvanceUploadError::NotFound,
        UploadProgressRepositoryError::Conflict => AdvanceUploadError::Conflict,
        UploadProgressRepositoryError::DatabaseError(msg) => AdvanceUploadError::RepositoryError(msg),
    }
}
