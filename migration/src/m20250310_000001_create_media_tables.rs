use sea_orm_migration::prelude::*;

use crate::m20250304_000001_create_users_and_auth_tokens::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAssets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MediaAssets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MediaAssets::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(MediaAssets::Name).string_len(100).not_null())
                    .col(ColumnDef::new(MediaAssets::Category).string_len(10).not_null())
                    .col(
                        ColumnDef::new(MediaAssets::OriginalFileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAssets::ContentType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MediaAssets::ThumbnailUrl).text().null())
                    .col(ColumnDef::new(MediaAssets::SizeBytes).big_integer().not_null())
                    .col(ColumnDef::new(MediaAssets::DurationSeconds).integer().null())
                    .col(ColumnDef::new(MediaAssets::StorageBucket).string_len(255).null())
                    .col(ColumnDef::new(MediaAssets::StorageKey).text().null())
                    .col(
                        ColumnDef::new(MediaAssets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MediaAssets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .check(Expr::cust("category IN ('image', 'video', 'audio')"))
                    .check(Expr::cust("size_bytes >= 0"))
                    .check(Expr::cust(
                        "(storage_bucket IS NULL) = (storage_key IS NULL)",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_assets_owner")
                            .from(MediaAssets::Table, MediaAssets::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner listing: active assets, newest first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_assets_owner_active
                ON media_assets (owner_id, created_at DESC)
                WHERE is_active = true;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UploadProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UploadProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UploadProgress::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(UploadProgress::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::AssetCategory)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::ProgressPercentage)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::ErrorMessage)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::TotalSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UploadProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::cust(
                        "status IN ('pending', 'uploading', 'processing', 'completed', 'failed')",
                    ))
                    .check(Expr::cust("progress_percentage BETWEEN 0 AND 100"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_progress_owner")
                            .from(UploadProgress::Table, UploadProgress::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_upload_progress_owner")
                    .table(UploadProgress::Table)
                    .col(UploadProgress::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_upload_progress_updated_at
                BEFORE UPDATE ON upload_progress
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaAssets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaAssets {
    Table,
    Id,
    OwnerId,
    Name,
    Category,
    OriginalFileName,
    ContentType,
    ThumbnailUrl,
    SizeBytes,
    DurationSeconds,
    StorageBucket,
    StorageKey,
    CreatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum UploadProgress {
    Table,
    Id,
    OwnerId,
    FileName,
    AssetCategory,
    Status,
    ProgressPercentage,
    ErrorMessage,
    TotalSize,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
