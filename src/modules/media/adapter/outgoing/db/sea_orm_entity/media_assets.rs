use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub owner_id: Uuid,
    pub name: String,
    pub category: String,
    pub original_file_name: String,
    pub content_type: String,
    pub thumbnail_url: Option<String>,
    pub size_bytes: i64,
    pub duration_seconds: Option<i32>,

    // Set together or not at all (CHECK constraint).
    pub storage_bucket: Option<String>,
    pub storage_key: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
