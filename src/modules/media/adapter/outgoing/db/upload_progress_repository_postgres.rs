use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::upload_progress::{self, ActiveModel, Column, Entity};
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::{UploadProgress, UploadStatus};
use crate::media::application::ports::outgoing::db::{
    UploadProgressRepository, UploadProgressRepositoryError,
};

#[derive(Clone)]
pub struct UploadProgressRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UploadProgressRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UploadProgressRepository for UploadProgressRepositoryPostgres {
    async fn record_progress(&self, progress: &UploadProgress) -> Result<(), UploadProgressRepositoryError> {
        let model = ActiveModel {
            id: Set(progress.id),
            owner_id: Set(progress.owner.into()),
            file_name: Set(progress.file_name.clone()),
            asset_category: Set(progress.category.as_str().to_string()),
            status: Set(progress.status().as_str().to_string()),
            progress_percentage: Set(i16::from(progress.progress_percentage())),
            error_message: Set(progress.error_message().to_string()),
            total_size: Set(i64::try_from(progress.total_size).unwrap_or(i64::MAX)),
            metadata: Set(serde_json::Value::Object(progress.metadata.clone())),
            created_at: Set(progress.created_at.fixed_offset()),
            updated_at: Set(progress.updated_at().fixed_offset()),
        };

        model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn find_progress(
        &self,
        owner: UserId,
        upload_id: Uuid,
    ) -> Result<UploadProgress, UploadProgressRepositoryError> {
        let owner_uuid: Uuid = owner.into();

        let model = Entity::find_by_id(upload_id)
            .filter(Column::OwnerId.eq(owner_uuid))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(UploadProgressRepositoryError::NotFound)?;

        model_to_progress(model)
    }

    async fn save_progress(
        &self,
        progress: &UploadProgress,
        expected: UploadStatus,
    ) -> Result<(), UploadProgressRepositoryError> {
        let owner_uuid: Uuid = progress.owner.into();
        let percentage = i16::from(progress.progress_percentage());

        let model = ActiveModel {
            status: Set(progress.status().as_str().to_string()),
            progress_percentage: Set(percentage),
            error_message: Set(progress.error_message().to_string()),
            updated_at: Set(progress.updated_at().fixed_offset()),
            ..Default::default()
        };

        let res = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(progress.id))
            .filter(Column::OwnerId.eq(owner_uuid))
            .filter(Column::Status.eq(expected.as_str()))
            .filter(Column::Status.is_not_in(TERMINAL_STATUSES))
            .filter(Column::ProgressPercentage.lte(percentage))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected > 0 {
            return Ok(());
        }

        // Nothing matched: either the row is gone or another writer got there first.
        let exists = Entity::find_by_id(progress.id)
            .filter(Column::OwnerId.eq(owner_uuid))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .is_some();

        if exists {
            tracing::warn!(upload_id = %progress.id, expected = %expected, "Stale upload progress write");
            Err(UploadProgressRepositoryError::Conflict)
        } else {
            Err(UploadProgressRepositoryError::NotFound)
        }
    }
}

const TERMINAL_STATUSES: [&str; 2] = ["completed", "failed"];

// Helper Functions

fn model_to_progress(
    model: upload_progress::Model,
) -> Result<UploadProgress, UploadProgressRepositoryError> {
    let category = model
        .asset_category
        .parse::<AssetCategory>()
        .map_err(|e| UploadProgressRepositoryError::DatabaseError(e.to_string()))?;
    let status = model
        .status
        .parse::<UploadStatus>()
        .map_err(|e| UploadProgressRepositoryError::DatabaseError(e.to_string()))?;

    let metadata = match model.metadata {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    Ok(UploadProgress::restore(
        model.id,
        UserId::from(model.owner_id),
        model.file_name,
        category,
        status,
        model.progress_percentage.clamp(0, 100) as u8,
        model.error_message,
        model.total_size.max(0) as u64,
        metadata,
        model.created_at.into(),
        model.updated_at.into(),
    ))
}

fn map_db_err(e: DbErr) -> UploadProgressRepositoryError {
    UploadProgressRepositoryError::DatabaseError(e.to_string())
}

// Tests
