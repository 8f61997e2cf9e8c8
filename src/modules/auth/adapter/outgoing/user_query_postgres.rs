use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity, Model as UserModel};
use crate::auth::application::domain::entities::{Preferences, User, UserRole};
use crate::auth::application::ports::outgoing::{UserQuery, UserQueryError};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Unknown role strings surface as `CorruptRecord`.
pub(super) fn model_to_user(model: UserModel) -> Result<User, UserQueryError> {
    let role: UserRole = model
        .role
        .parse()
        .map_err(|e| UserQueryError::CorruptRecord(format!("user {}: {e}", model.id)))?;

    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        phone: model.phone,
        role,
        preferences: Preferences::from_stored(&model.preferences),
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
        is_verified: model.is_verified,
        is_deleted: model.is_deleted,
    })
}

impl UserQueryPostgres {
    async fn first(&self, select: Select<UserEntity>) -> Result<Option<User>, UserQueryError> {
        select
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .map(model_to_user)
            .transpose()
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        self.first(UserEntity::find_by_id(user_id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        self.first(UserEntity::find().filter(UserColumn::Email.eq(email)))
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        self.first(UserEntity::find().filter(UserColumn::Username.eq(username)))
            .await
    }
}
