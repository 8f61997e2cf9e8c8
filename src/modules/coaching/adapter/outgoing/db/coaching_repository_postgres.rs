use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{
    achievements, client_achievements, client_instructor_relationships as relationships,
    exercise_progress,
};
use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::UserId;
use crate::coaching::application::domain::{
    Achievement, AchievementCriteria, AssignedClient, ClientAchievement, EarnedAchievement,
    ExerciseProgress, ProgressTarget, Relationship,
};
use crate::coaching::application::ports::outgoing::{
    AchievementRepository, CoachingRepositoryError, ProgressRepository, RelationshipRepository,
};
use crate::program::application::domain::dedup_ids;

#[derive(Clone)]
pub struct CoachingRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CoachingRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RelationshipRepository for CoachingRepositoryPostgres {
    async fn create_relationship(
        &self,
        relationship: &Relationship,
    ) -> Result<Relationship, CoachingRepositoryError> {
        let model = relationships::ActiveModel {
            id: Set(relationship.id),
            client_id: Set(relationship.client_id.into()),
            instructor_id: Set(relationship.instructor_id.into()),
            routine_ids: Set(ids_to_json(&relationship.routine_ids)),
            created_at: Set(relationship.created_at.fixed_offset()),
        };

        let saved = model.insert(&*self.db).await.map_err(map_insert_err)?;
        model_to_relationship(saved)
    }

    async fn list_clients(
        &self,
        instructor: UserId,
    ) -> Result<Vec<AssignedClient>, CoachingRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        let rows = relationships::Entity::find()
            .filter(relationships::Column::InstructorId.eq(instructor_uuid))
            .order_by_desc(relationships::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids: Vec<Uuid> = rows.iter().map(|r| r.client_id).collect();
        let clients: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(client_ids))
            .filter(users::Column::IsDeleted.eq(false))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(client) = clients.get(&row.client_id) else {
                continue;
            };
            out.push(AssignedClient {
                username: client.username.clone(),
                email: client.email.clone(),
                full_name: client.full_name.clone(),
                relationship: model_to_relationship(row)?,
            });
        }
        Ok(out)
    }

    async fn set_routine_ids(
        &self,
        instructor: UserId,
        relationship_id: Uuid,
        routine_ids: &[Uuid],
    ) -> Result<AssignedClient, CoachingRepositoryError> {
        let instructor_uuid: Uuid = instructor.into();

        let model = relationships::ActiveModel {
            routine_ids: Set(ids_to_json(routine_ids)),
            ..Default::default()
        };

        let res = relationships::Entity::update_many()
            .set(model)
            .filter(relationships::Column::Id.eq(relationship_id))
            .filter(relationships::Column::InstructorId.eq(instructor_uuid))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(CoachingRepositoryError::NotFound);
        }

        let row = relationships::Entity::find_by_id(relationship_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(CoachingRepositoryError::NotFound)?;
        let client = users::Entity::find_by_id(row.client_id)
            .filter(users::Column::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(CoachingRepositoryError::NotFound)?;

        Ok(AssignedClient {
            username: client.username,
            email: client.email,
            full_name: client.full_name,
            relationship: model_to_relationship(row)?,
        })
    }

    async fn assigned_routine_ids(&self, client: UserId) -> Result<Vec<Uuid>, CoachingRepositoryError> {
        let client_uuid: Uuid = client.into();

        let mut ids = Vec::new();
        for row in relationships::Entity::find()
            .filter(relationships::Column::ClientId.eq(client_uuid))
            .order_by_asc(relationships::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
        {
            ids.extend(model_to_relationship(row)?.routine_ids);
        }
        Ok(dedup_ids(ids))
    }
}

#[async_trait]
impl ProgressRepository for CoachingRepositoryPostgres {
    async fn record_progress(
        &self,
        progress: &ExerciseProgress,
    ) -> Result<ExerciseProgress, CoachingRepositoryError> {
        let model = exercise_progress::ActiveModel {
            id: Set(progress.id),
            client_id: Set(progress.client_id.into()),
            exercise_id: Set(progress.target.exercise_id()),
            breathing_exercise_id: Set(progress.target.breathing_exercise_id()),
            meditation_session_id: Set(progress.target.meditation_session_id()),
            completed_at: Set(progress.completed_at.fixed_offset()),
            duration_seconds: Set(i32::try_from(progress.duration_seconds).unwrap_or(i32::MAX)),
            notes: Set(progress.notes.clone()),
            difficulty_rating: Set(progress.difficulty_rating.map(i16::from)),
            feedback: Set(progress.feedback.clone()),
        };

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;
        model_to_progress(saved)
    }

    async fn list_progress(
        &self,
        client: UserId,
    ) -> Result<Vec<ExerciseProgress>, CoachingRepositoryError> {
        let client_uuid: Uuid = client.into();

        exercise_progress::Entity::find()
            .filter(exercise_progress::Column::ClientId.eq(client_uuid))
            .order_by_desc(exercise_progress::Column::CompletedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_progress)
            .collect()
    }

    async fn completion_times(
        &self,
        client: UserId,
    ) -> Result<Vec<DateTime<Utc>>, CoachingRepositoryError> {
        let client_uuid: Uuid = client.into();

        Ok(exercise_progress::Entity::find()
            .filter(exercise_progress::Column::ClientId.eq(client_uuid))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|p| p.completed_at.into())
            .collect())
    }
}

#[async_trait]
impl AchievementRepository for CoachingRepositoryPostgres {
    async fn list_active_achievements(&self) -> Result<Vec<Achievement>, CoachingRepositoryError> {
        achievements::Entity::find()
            .filter(achievements::Column::IsActive.eq(true))
            .order_by_asc(achievements::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_achievement)
            .collect()
    }

    async fn list_client_achievements(
        &self,
        client: UserId,
    ) -> Result<Vec<EarnedAchievement>, CoachingRepositoryError> {
        let client_uuid: Uuid = client.into();

        let awards = client_achievements::Entity::find()
            .filter(client_achievements::Column::ClientId.eq(client_uuid))
            .order_by_desc(client_achievements::Column::EarnedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        if awards.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = awards.iter().map(|a| a.achievement_id).collect();
        let catalog: HashMap<Uuid, Achievement> = achievements::Entity::find()
            .filter(achievements::Column::Id.is_in(ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| model_to_achievement(m).map(|a| (a.id, a)))
            .collect::<Result<_, _>>()?;

        Ok(awards
            .into_iter()
            .filter_map(|award| {
                let achievement = catalog.get(&award.achievement_id)?.clone();
                Some(EarnedAchievement {
                    award: model_to_award(award),
                    achievement,
                })
            })
            .collect())
    }

    async fn award(&self, award: &ClientAchievement) -> Result<(), CoachingRepositoryError> {
        let model = client_achievements::ActiveModel {
            id: Set(award.id),
            client_id: Set(award.client_id.into()),
            achievement_id: Set(award.achievement_id),
            earned_at: Set(award.earned_at.fixed_offset()),
            progress_data: Set(Value::Object(award.progress_data.clone())),
        };

        model.insert(&*self.db).await.map_err(map_insert_err)?;
        Ok(())
    }
}

// Helper Functions

fn ids_to_json(ids: &[Uuid]) -> Value {
    Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
}

fn corrupt(e: impl std::fmt::Display) -> CoachingRepositoryError {
    CoachingRepositoryError::DatabaseError(e.to_string())
}

fn model_to_relationship(
    model: relationships::Model,
) -> Result<Relationship, CoachingRepositoryError> {
    Ok(Relationship {
        id: model.id,
        client_id: UserId::from(model.client_id),
        instructor_id: UserId::from(model.instructor_id),
        routine_ids: serde_json::from_value(model.routine_ids).map_err(corrupt)?,
        created_at: model.created_at.into(),
    })
}

fn model_to_progress(
    model: exercise_progress::Model,
) -> Result<ExerciseProgress, CoachingRepositoryError> {
    let target = ProgressTarget::from_parts(
        model.exercise_id,
        model.breathing_exercise_id,
        model.meditation_session_id,
    )
    .map_err(corrupt)?;

    Ok(ExerciseProgress {
        id: model.id,
        client_id: UserId::from(model.client_id),
        target,
        completed_at: model.completed_at.into(),
        duration_seconds: model.duration_seconds.max(0) as u32,
        notes: model.notes,
        difficulty_rating: model
            .difficulty_rating
            .and_then(|r| u8::try_from(r).ok()),
        feedback: model.feedback,
    })
}

fn model_to_achievement(model: achievements::Model) -> Result<Achievement, CoachingRepositoryError> {
    let criteria: AchievementCriteria = serde_json::from_value(model.criteria).map_err(corrupt)?;

    Ok(Achievement {
        id: model.id,
        name: model.name,
        description: model.description,
        achievement_type: model.achievement_type.parse().map_err(corrupt)?,
        icon_url: model.icon_url,
        criteria,
        created_at: model.created_at.into(),
        is_active: model.is_active,
    })
}

fn model_to_award(model: client_achievements::Model) -> ClientAchievement {
    let progress_data = match model.progress_data {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    ClientAchievement {
        id: model.id,
        client_id: UserId::from(model.client_id),
        achievement_id: model.achievement_id,
        earned_at: model.earned_at.into(),
        progress_data,
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    let err_str = e.to_string().to_lowercase();
    err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
}

fn map_insert_err(e: DbErr) -> CoachingRepositoryError {
    if is_unique_violation(&e) {
        return CoachingRepositoryError::Conflict;
    }
    map_db_err(e)
}

fn map_db_err(e: DbErr) -> CoachingRepositoryError {
    CoachingRepositoryError::DatabaseError(e.to_string())
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::application::domain::AchievementType;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn user_model(id: Uuid, deleted: bool) -> users::Model {
        let now = Utc::now().fixed_offset();
        users::Model {
            id,
            username: "calm_client".to_string(),
            email: "client@example.com".to_string(),
            password_hash: "hash".to_string(),
            full_name: "Calm Client".to_string(),
            phone: None,
            role: "client".to_string(),
            preferences: json!({}),
            created_at: now,
            updated_at: now,
            is_verified: true,
            is_deleted: deleted,
        }
    }

    fn relationship_model(client_id: Uuid, instructor_id: Uuid) -> relationships::Model {
        relationships::Model {
            id: Uuid::new_v4(),
            client_id,
            instructor_id,
            routine_ids: json!([]),
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn progress_model(meditation: Option<Uuid>, breathing: Option<Uuid>) -> exercise_progress::Model {
        exercise_progress::Model {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            exercise_id: None,
            breathing_exercise_id: breathing,
            meditation_session_id: meditation,
            completed_at: Utc::now().fixed_offset(),
            duration_seconds: 300,
            notes: String::new(),
            difficulty_rating: Some(3),
            feedback: String::new(),
        }
    }

    fn achievement_model(id: Uuid, kind: &str) -> achievements::Model {
        achievements::Model {
            id,
            name: "Week streak".to_string(),
            description: "Seven days in a row".to_string(),
            achievement_type: kind.to_string(),
            icon_url: String::new(),
            criteria: json!({"days_streak": 7}),
            created_at: Utc::now().fixed_offset(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_relationship_duplicate_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            )])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let rel = Relationship::new(
            UserId::from(Uuid::new_v4()),
            UserId::from(Uuid::new_v4()),
            vec![],
            Utc::now(),
        );
        assert_eq!(
            repo.create_relationship(&rel).await.unwrap_err(),
            CoachingRepositoryError::Conflict
        );
    }

    #[tokio::test]
    async fn test_set_routine_ids_for_foreign_relationship_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let err = repo
            .set_routine_ids(UserId::from(Uuid::new_v4()), Uuid::new_v4(), &[Uuid::new_v4()])
            .await
            .unwrap_err();
        assert_eq!(err, CoachingRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn test_set_routine_ids_returns_joined_client() {
        let (client, instructor, routine) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut row = relationship_model(client, instructor);
        row.routine_ids = json!([routine]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![row.clone()]])
            .append_query_results([vec![user_model(client, false)]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let assigned = repo
            .set_routine_ids(UserId::from(instructor), row.id, &[routine])
            .await
            .unwrap();

        assert_eq!(assigned.relationship.routine_ids, vec![routine]);
        assert_eq!(assigned.email, "client@example.com");
    }

    #[tokio::test]
    async fn test_assigned_routine_ids_merges_instructors() {
        let client = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut first = relationship_model(client, Uuid::new_v4());
        first.routine_ids = json!([a, b]);
        let mut second = relationship_model(client, Uuid::new_v4());
        second.routine_ids = json!([b]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![first, second]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let ids = repo.assigned_routine_ids(UserId::from(client)).await.unwrap();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_list_clients_joins_users() {
        let instructor = Uuid::new_v4();
        let (kept, gone) = (Uuid::new_v4(), Uuid::new_v4());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                relationship_model(kept, instructor),
                relationship_model(gone, instructor),
            ]])
            .append_query_results([vec![user_model(kept, false)]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let clients = repo.list_clients(UserId::from(instructor)).await.unwrap();

        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].relationship.client_id, UserId::from(kept));
        assert_eq!(clients[0].username, "calm_client");
    }

    #[tokio::test]
    async fn test_list_clients_empty_skips_user_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<relationships::Model>::new()])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        assert!(repo
            .list_clients(UserId::from(Uuid::new_v4()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_progress_restores_target() {
        let session = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![progress_model(Some(session), None)]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let entries = repo.list_progress(UserId::from(Uuid::new_v4())).await.unwrap();

        assert_eq!(entries[0].target, ProgressTarget::MeditationSession(session));
        assert_eq!(entries[0].difficulty_rating, Some(3));
    }

    #[tokio::test]
    async fn test_progress_row_with_two_targets_is_corrupt() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![progress_model(Some(Uuid::new_v4()), Some(Uuid::new_v4()))]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        assert!(matches!(
            repo.list_progress(UserId::from(Uuid::new_v4())).await.unwrap_err(),
            CoachingRepositoryError::DatabaseError(_)
        ));
    }

    #[tokio::test]
    async fn test_list_achievements_parses_criteria() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![achievement_model(Uuid::new_v4(), "consistency")]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let catalog = repo.list_active_achievements().await.unwrap();

        assert_eq!(catalog[0].achievement_type, AchievementType::Consistency);
        assert_eq!(catalog[0].criteria.days_streak, Some(7));
    }

    #[tokio::test]
    async fn test_list_client_achievements_joins_catalog() {
        let (client, achievement_id) = (Uuid::new_v4(), Uuid::new_v4());
        let award = client_achievements::Model {
            id: Uuid::new_v4(),
            client_id: client,
            achievement_id,
            earned_at: Utc::now().fixed_offset(),
            progress_data: json!({"days_streak": 7}),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![award]])
            .append_query_results([vec![achievement_model(achievement_id, "consistency")]])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let earned = repo.list_client_achievements(UserId::from(client)).await.unwrap();

        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].achievement.id, achievement_id);
        assert_eq!(earned[0].award.progress_data["days_streak"], 7);
    }

    #[tokio::test]
    async fn test_award_duplicate_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("error code 23505".to_string())])
            .into_connection();

        let repo = CoachingRepositoryPostgres::new(Arc::new(db));
        let award = ClientAchievement {
            id: Uuid::new_v4(),
            client_id: UserId::from(Uuid::new_v4()),
            achievement_id: Uuid::new_v4(),
            earned_at: Utc::now(),
            progress_data: Map::new(),
        };
        assert_eq!(
            repo.award(&award).await.unwrap_err(),
            CoachingRepositoryError::Conflict
        );
    }
}
