use sea_orm_migration::prelude::*;

use crate::m20250304_000001_create_users_and_auth_tokens::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TABLES: [&str; 4] = [
    "routines",
    "breathing_exercises",
    "meditation_sessions",
    "combined_routines",
];

fn owner_fk(name: &str, table: impl IntoIden + 'static) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from_tbl(table)
        .from_col(Alias::new("instructor_id"))
        .to(Users::Table, Users::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

fn timestamps(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Alias::new("created_at"))
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Alias::new("updated_at"))
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Alias::new("is_active"))
                .boolean()
                .not_null()
                .default(true),
        )
}

fn json_list(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .json_binary()
        .not_null()
        .default(Expr::cust("'[]'::jsonb"))
        .to_owned()
}

fn json_object(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .json_binary()
        .not_null()
        .default(Expr::cust("'{}'::jsonb"))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut routines = Table::create();
        routines
            .table(Routines::Table)
            .if_not_exists()
            .col(ColumnDef::new(Routines::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Routines::InstructorId).uuid().not_null())
            .col(ColumnDef::new(Routines::Name).string_len(100).not_null())
            .col(ColumnDef::new(Routines::Description).text().not_null().default(""))
            .col(json_list(Routines::Exercises));
        timestamps(&mut routines).foreign_key(&mut owner_fk("fk_routines_instructor", Routines::Table));
        manager.create_table(routines.to_owned()).await?;

        let mut breathing = Table::create();
        breathing
            .table(BreathingExercises::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(BreathingExercises::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(BreathingExercises::InstructorId).uuid().not_null())
            .col(ColumnDef::new(BreathingExercises::Name).string_len(100).not_null())
            .col(
                ColumnDef::new(BreathingExercises::Description)
                    .text()
                    .not_null()
                    .default(""),
            )
            .col(json_list(BreathingExercises::MediaAssetIds))
            .col(ColumnDef::new(BreathingExercises::InhaleSeconds).integer().not_null())
            .col(ColumnDef::new(BreathingExercises::HoldSeconds).integer().not_null())
            .col(ColumnDef::new(BreathingExercises::ExhaleSeconds).integer().not_null())
            .col(ColumnDef::new(BreathingExercises::Cycles).integer().not_null())
            .col(
                ColumnDef::new(BreathingExercises::PatternType)
                    .string_len(20)
                    .not_null(),
            )
            .col(
                ColumnDef::new(BreathingExercises::HasVisualCue)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(
                ColumnDef::new(BreathingExercises::HasAudioCue)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(ColumnDef::new(BreathingExercises::CueStyle).string_len(20).not_null())
            .col(
                ColumnDef::new(BreathingExercises::Difficulty)
                    .string_len(20)
                    .not_null(),
            )
            .col(json_object(BreathingExercises::MasteryCriteria))
            .check(Expr::cust(
                "inhale_seconds >= 1 AND hold_seconds >= 0 AND exhale_seconds >= 1 AND cycles >= 1",
            ));
        timestamps(&mut breathing).foreign_key(&mut owner_fk(
            "fk_breathing_exercises_instructor",
            BreathingExercises::Table,
        ));
        manager.create_table(breathing.to_owned()).await?;

        let mut meditation = Table::create();
        meditation
            .table(MeditationSessions::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(MeditationSessions::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(MeditationSessions::InstructorId).uuid().not_null())
            .col(ColumnDef::new(MeditationSessions::Name).string_len(100).not_null())
            .col(
                ColumnDef::new(MeditationSessions::Description)
                    .text()
                    .not_null()
                    .default(""),
            )
            .col(
                ColumnDef::new(MeditationSessions::DurationMinutes)
                    .integer()
                    .not_null()
                    .default(10),
            )
            .col(
                ColumnDef::new(MeditationSessions::SessionType)
                    .string_len(20)
                    .not_null(),
            )
            .col(
                ColumnDef::new(MeditationSessions::GuidedScript)
                    .text()
                    .not_null()
                    .default(""),
            )
            .col(json_list(MeditationSessions::FocusPoints))
            .col(ColumnDef::new(MeditationSessions::BackgroundAudioId).uuid().null())
            .col(ColumnDef::new(MeditationSessions::GuidedAudioId).uuid().null())
            .col(
                ColumnDef::new(MeditationSessions::HasVisualGuide)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(MeditationSessions::HasAmbientSounds)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(MeditationSessions::AmbientSoundType)
                    .string_len(20)
                    .not_null(),
            )
            .col(
                ColumnDef::new(MeditationSessions::Difficulty)
                    .string_len(20)
                    .not_null(),
            )
            .col(json_object(MeditationSessions::FocusLevelAssessment))
            .col(json_object(MeditationSessions::AchievementCriteria))
            .check(Expr::cust("duration_minutes >= 1"));
        timestamps(&mut meditation).foreign_key(&mut owner_fk(
            "fk_meditation_sessions_instructor",
            MeditationSessions::Table,
        ));
        manager.create_table(meditation.to_owned()).await?;

        let mut combined = Table::create();
        combined
            .table(CombinedRoutines::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(CombinedRoutines::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(CombinedRoutines::InstructorId).uuid().not_null())
            .col(ColumnDef::new(CombinedRoutines::Name).string_len(100).not_null())
            .col(
                ColumnDef::new(CombinedRoutines::Description)
                    .text()
                    .not_null()
                    .default(""),
            )
            .col(json_list(CombinedRoutines::RoutineIds))
            .col(json_list(CombinedRoutines::BreathingExerciseIds))
            .col(json_list(CombinedRoutines::MeditationSessionIds))
            .col(
                ColumnDef::new(CombinedRoutines::TransitionNotes)
                    .text()
                    .not_null()
                    .default(""),
            );
        timestamps(&mut combined).foreign_key(&mut owner_fk(
            "fk_combined_routines_instructor",
            CombinedRoutines::Table,
        ));
        manager.create_table(combined.to_owned()).await?;

        // Instructor listings: active rows, newest first
        for table in TABLES {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "CREATE INDEX idx_{table}_instructor_active \
                     ON {table} (instructor_id, created_at DESC) \
                     WHERE is_active = true;"
                ))
                .await?;

            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "CREATE TRIGGER update_{table}_updated_at \
                     BEFORE UPDATE ON {table} \
                     FOR EACH ROW \
                     EXECUTE FUNCTION update_updated_at_column();"
                ))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Routines {
    Table,
    Id,
    InstructorId,
    Name,
    Description,
    Exercises,
}

#[derive(DeriveIden)]
enum BreathingExercises {
    Table,
    Id,
    InstructorId,
    Name,
    Description,
    MediaAssetIds,
    InhaleSeconds,
    HoldSeconds,
    ExhaleSeconds,
    Cycles,
    PatternType,
    HasVisualCue,
    HasAudioCue,
    CueStyle,
    Difficulty,
    MasteryCriteria,
}

#[derive(DeriveIden)]
enum MeditationSessions {
    Table,
    Id,
    InstructorId,
    Name,
    Description,
    DurationMinutes,
    SessionType,
    GuidedScript,
    FocusPoints,
    BackgroundAudioId,
    GuidedAudioId,
    HasVisualGuide,
    HasAmbientSounds,
    AmbientSoundType,
    Difficulty,
    FocusLevelAssessment,
    AchievementCriteria,
}

#[derive(DeriveIden)]
enum CombinedRoutines {
    Table,
    Id,
    InstructorId,
    Name,
    Description,
    RoutineIds,
    BreathingExerciseIds,
    MeditationSessionIds,
    TransitionNotes,
}
