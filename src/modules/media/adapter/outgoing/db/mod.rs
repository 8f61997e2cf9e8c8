mod media_asset_repository_postgres;
pub mod sea_orm_entity;
mod upload_progress_repository_postgres;

pub use media_asset_repository_postgres::MediaAssetRepositoryPostgres;
pub use upload_progress_repository_postgres::UploadProgressRepositoryPostgres;
