use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::media_assets::{self, ActiveModel, Column, Entity};
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::{MediaAsset, StorageLocation};
use crate::media::application::ports::outgoing::db::{
    MediaAssetRepository, MediaAssetRepositoryError,
};

#[derive(Clone)]
pub struct MediaAssetRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl MediaAssetRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaAssetRepository for MediaAssetRepositoryPostgres {
    async fn record_asset(&self, asset: &MediaAsset) -> Result<MediaAsset, MediaAssetRepositoryError> {
        let storage = asset.storage();

        let model = ActiveModel {
            id: Set(asset.id),
            owner_id: Set(asset.owner.into()),
            name: Set(asset.name.clone()),
            category: Set(asset.category.as_str().to_string()),
            original_file_name: Set(asset.original_file_name.clone()),
            content_type: Set(asset.content_type.clone()),
            thumbnail_url: Set(asset.thumbnail_url.clone()),
            size_bytes: Set(to_i64(asset.size_bytes)?),
            duration_seconds: Set(asset.duration_seconds.map(|d| d.min(i32::MAX as u32) as i32)),
            storage_bucket: Set(storage.map(|s| s.bucket.clone())),
            storage_key: Set(storage.map(|s| s.key.clone())),
            created_at: Set(asset.created_at.fixed_offset()),
            is_active: Set(asset.is_active),
        };

        let result = model.insert(&*self.db).await.map_err(map_insert_error)?;
        model_to_asset(result)
    }

    async fn find_asset(&self, owner: UserId, asset_id: Uuid) -> Result<MediaAsset, MediaAssetRepositoryError> {
        let owner_uuid: Uuid = owner.into();

        let model = Entity::find_by_id(asset_id)
            .filter(Column::OwnerId.eq(owner_uuid))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(MediaAssetRepositoryError::NotFound)?;

        model_to_asset(model)
    }

    async fn list_assets(&self, owner: UserId) -> Result<Vec<MediaAsset>, MediaAssetRepositoryError> {
        let owner_uuid: Uuid = owner.into();

        Entity::find()
            .filter(Column::OwnerId.eq(owner_uuid))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_asset)
            .collect()
    }

    async fn deactivate_asset(
        &self,
        owner: UserId,
        asset_id: Uuid,
    ) -> Result<MediaAsset, MediaAssetRepositoryError> {
        let owner_uuid: Uuid = owner.into();

        let model = ActiveModel {
            is_active: Set(false),
            ..Default::default()
        };

        let results = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(asset_id))
            .filter(Column::OwnerId.eq(owner_uuid))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        let result = results
            .into_iter()
            .next()
            .ok_or(MediaAssetRepositoryError::NotFound)?;

        model_to_asset(result)
    }

    async fn delete_asset(&self, owner: UserId, asset_id: Uuid) -> Result<(), MediaAssetRepositoryError> {
        let owner_uuid: Uuid = owner.into();

        let res = Entity::delete_many()
            .filter(Column::Id.eq(asset_id))
            .filter(Column::OwnerId.eq(owner_uuid))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(MediaAssetRepositoryError::NotFound);
        }
        Ok(())
    }
}

// Helper Functions

fn model_to_asset(model: media_assets::Model) -> Result<MediaAsset, MediaAssetRepositoryError> {
    let category = model
        .category
        .parse::<AssetCategory>()
        .map_err(|e| MediaAssetRepositoryError::DatabaseError(e.to_string()))?;

    let storage = match (model.storage_bucket, model.storage_key) {
        (Some(bucket), Some(key)) => Some(StorageLocation { bucket, key }),
        _ => None,
    };

    Ok(MediaAsset::restore(
        model.id,
        UserId::from(model.owner_id),
        model.name,
        category,
        model.original_file_name,
        model.content_type,
        model.thumbnail_url,
        model.size_bytes.max(0) as u64,
        model.duration_seconds.map(|d| d.max(0) as u32),
        storage,
        model.created_at.into(),
        model.is_active,
    ))
}

fn to_i64(value: u64) -> Result<i64, MediaAssetRepositoryError> {
    i64::try_from(value).map_err(|_| MediaAssetRepositoryError::DatabaseError("size overflow".into()))
}

fn map_insert_error(e: DbErr) -> MediaAssetRepositoryError {
    let msg = e.to_string().to_lowercase();

    if (msg.contains("duplicate") || msg.contains("unique") || msg.contains("23505"))
        && msg.contains("storage")
    {
        MediaAssetRepositoryError::DuplicateStorageLocation
    } else {
        MediaAssetRepositoryError::DatabaseError(e.to_string())
    }
}

fn map_db_err(e: DbErr) -> MediaAssetRepositoryError {
    MediaAssetRepositoryError::DatabaseError(e.to_string())
}

// Tests
