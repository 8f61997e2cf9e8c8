use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meditation_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub instructor_id: Uuid,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub session_type: String,
    pub guided_script: String,
    pub focus_points: Json,

    pub background_audio_id: Option<Uuid>,
    pub guided_audio_id: Option<Uuid>,
    pub has_visual_guide: bool,
    pub has_ambient_sounds: bool,
    pub ambient_sound_type: String,

    pub difficulty: String,
    pub focus_level_assessment: Json,
    pub achievement_criteria: Json,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
