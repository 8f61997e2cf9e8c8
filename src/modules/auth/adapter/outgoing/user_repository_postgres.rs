use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, SimpleExpr}, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
};
use super::user_query_postgres::model_to_user;
use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::{
    CreateUserData, ProfileChanges, UserRepository, UserRepositoryError,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Single-statement update of one live user; zero rows means not found.
    async fn update_live_user(
        &self,
        user_id: Uuid,
        column: UserColumn,
        value: SimpleExpr,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(column, value)
            .col_expr(UserColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .filter(UserColumn::IsDeleted.eq(false))
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }
}

fn db_error(e: DbErr) -> UserRepositoryError {
    UserRepositoryError::DatabaseError(e.to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    let err_str = e.to_string().to_lowercase();
    err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
}

fn to_domain(model: super::sea_orm_entity::users::Model) -> Result<User, UserRepositoryError> {
    model_to_user(model).map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        let now = Utc::now().fixed_offset();
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(data.username),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            full_name: Set(data.full_name),
            phone: Set(data.phone),
            role: Set(data.role.as_str().to_string()),
            preferences: Set(serde_json::json!({})),
            created_at: Set(now),
            updated_at: Set(now),
            is_verified: Set(false),
            is_deleted: Set(false),
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return UserRepositoryError::UserAlreadyExists;
            }
            db_error(e)
        })?;

        tracing::info!(user_id = %inserted.id, role = %inserted.role, "User created");
        to_domain(inserted)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.update_live_user(user_id, UserColumn::PasswordHash, Expr::value(new_password_hash))
            .await
    }

    async fn activate_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        self.update_live_user(user_id, UserColumn::IsVerified, Expr::value(true))
            .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id)
            .filter(UserColumn::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(db_error)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        let mut active_user: UserActiveModel = user.into();
        if let Some(full_name) = changes.full_name {
            active_user.full_name = Set(full_name);
        }
        if let Some(phone) = changes.phone {
            active_user.phone = Set(Some(phone));
        }
        if let Some(preferences) = changes.preferences {
            active_user.preferences = Set(preferences);
        }
        if let Some(password_hash) = changes.password_hash {
            active_user.password_hash = Set(password_hash);
        }
        active_user.updated_at = Set(Utc::now().fixed_offset());

        let updated = active_user.update(&*self.db).await.map_err(db_error)?;
        to_domain(updated)
    }
}
