use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exercise_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub client_id: Uuid,

    // Exactly one is set (CHECK constraint).
    pub exercise_id: Option<Uuid>,
    pub breathing_exercise_id: Option<Uuid>,
    pub meditation_session_id: Option<Uuid>,

    pub completed_at: DateTimeWithTimeZone,
    pub duration_seconds: i32,
    pub notes: String,
    pub difficulty_rating: Option<i16>,
    pub feedback: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
