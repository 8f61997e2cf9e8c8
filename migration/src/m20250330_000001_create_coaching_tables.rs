use sea_orm_migration::prelude::*;

use crate::m20250304_000001_create_users_and_auth_tokens::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (name, description, type, criteria)
const DEFAULT_ACHIEVEMENTS: [(&str, &str, &str, &str); 4] = [
    (
        "First step",
        "Complete your first session",
        "milestone",
        r#"{"exercise_count": 1}"#,
    ),
    (
        "Ten sessions",
        "Complete ten sessions",
        "milestone",
        r#"{"exercise_count": 10}"#,
    ),
    (
        "Three day streak",
        "Practice three days in a row",
        "consistency",
        r#"{"days_streak": 3}"#,
    ),
    (
        "Week streak",
        "Practice seven days in a row",
        "consistency",
        r#"{"days_streak": 7}"#,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientInstructorRelationships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientInstructorRelationships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientInstructorRelationships::ClientId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientInstructorRelationships::InstructorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientInstructorRelationships::RoutineIds)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(ClientInstructorRelationships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_client")
                            .from(
                                ClientInstructorRelationships::Table,
                                ClientInstructorRelationships::ClientId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_instructor")
                            .from(
                                ClientInstructorRelationships::Table,
                                ClientInstructorRelationships::InstructorId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_relationships_client_instructor")
                    .table(ClientInstructorRelationships::Table)
                    .col(ClientInstructorRelationships::ClientId)
                    .col(ClientInstructorRelationships::InstructorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_relationships_instructor")
                    .table(ClientInstructorRelationships::Table)
                    .col(ClientInstructorRelationships::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExerciseProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExerciseProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExerciseProgress::ClientId).uuid().not_null())
                    .col(ColumnDef::new(ExerciseProgress::ExerciseId).uuid().null())
                    .col(ColumnDef::new(ExerciseProgress::BreathingExerciseId).uuid().null())
                    .col(ColumnDef::new(ExerciseProgress::MeditationSessionId).uuid().null())
                    .col(
                        ColumnDef::new(ExerciseProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ExerciseProgress::DurationSeconds)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExerciseProgress::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ExerciseProgress::DifficultyRating)
                            .small_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExerciseProgress::Feedback)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    // Exactly one target per record
                    .check(Expr::cust(
                        "num_nonnulls(exercise_id, breathing_exercise_id, meditation_session_id) = 1",
                    ))
                    .check(Expr::cust(
                        "difficulty_rating IS NULL OR difficulty_rating BETWEEN 1 AND 5",
                    ))
                    .check(Expr::cust("duration_seconds >= 0"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exercise_progress_client")
                            .from(ExerciseProgress::Table, ExerciseProgress::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_exercise_progress_client_completed
                ON exercise_progress (client_id, completed_at DESC);
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Achievements::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(Achievements::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Achievements::Description).text().not_null())
                    .col(
                        ColumnDef::new(Achievements::AchievementType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Achievements::IconUrl)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Achievements::Criteria)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Achievements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Achievements::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .check(Expr::cust(
                        "achievement_type IN ('consistency', 'mastery', 'milestone', 'special')",
                    ))
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(Achievements::Table).columns([
            Achievements::Name,
            Achievements::Description,
            Achievements::AchievementType,
            Achievements::Criteria,
        ]);
        for (name, description, kind, criteria) in DEFAULT_ACHIEVEMENTS {
            seed.values_panic([
                name.into(),
                description.into(),
                kind.into(),
                Expr::cust(format!("'{criteria}'::jsonb")),
            ]);
        }
        manager.exec_stmt(seed).await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientAchievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientAchievements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClientAchievements::ClientId).uuid().not_null())
                    .col(
                        ColumnDef::new(ClientAchievements::AchievementId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientAchievements::EarnedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ClientAchievements::ProgressData)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_achievements_client")
                            .from(ClientAchievements::Table, ClientAchievements::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_achievements_achievement")
                            .from(ClientAchievements::Table, ClientAchievements::AchievementId)
                            .to(Achievements::Table, Achievements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_client_achievements_client_achievement")
                    .table(ClientAchievements::Table)
                    .col(ClientAchievements::ClientId)
                    .col(ClientAchievements::AchievementId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientAchievements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Achievements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExerciseProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientInstructorRelationships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClientInstructorRelationships {
    Table,
    Id,
    ClientId,
    InstructorId,
    RoutineIds,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExerciseProgress {
    Table,
    Id,
    ClientId,
    ExerciseId,
    BreathingExerciseId,
    MeditationSessionId,
    CompletedAt,
    DurationSeconds,
    Notes,
    DifficultyRating,
    Feedback,
}

#[derive(DeriveIden)]
enum Achievements {
    Table,
    Id,
    Name,
    Description,
    AchievementType,
    IconUrl,
    Criteria,
    CreatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum ClientAchievements {
    Table,
    Id,
    ClientId,
    AchievementId,
    EarnedAt,
    ProgressData,
}
