use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "breathing_exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub instructor_id: Uuid,
    pub name: String,
    pub description: String,
    pub media_asset_ids: Json,

    pub inhale_seconds: i32,
    pub hold_seconds: i32,
    pub exhale_seconds: i32,
    pub cycles: i32,
    pub pattern_type: String,

    pub has_visual_cue: bool,
    pub has_audio_cue: bool,
    pub cue_style: String,
    pub difficulty: String,
    pub mastery_criteria: Json,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
