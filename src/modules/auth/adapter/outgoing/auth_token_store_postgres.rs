use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::auth_tokens::{ActiveModel, Column, Entity};
use crate::auth::application::domain::entities::AuthTokenPurpose;
use crate::auth::application::ports::outgoing::{AuthTokenStore, AuthTokenStoreError, NewAuthToken};

#[derive(Clone, Debug)]
pub struct AuthTokenStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl AuthTokenStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthTokenStore for AuthTokenStorePostgres {
    async fn save(&self, token: NewAuthToken) -> Result<(), AuthTokenStoreError> {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(token.user_id),
            purpose: Set(token.purpose.as_str().to_string()),
            token_hash: Set(token.token_hash),
            expires_at: Set(token.expires_at.fixed_offset()),
            consumed_at: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&*self.db)
        .await
        .map_err(|e| AuthTokenStoreError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// One conditional UPDATE, so two concurrent redemptions cannot both win.
    async fn consume(
        &self,
        token_hash: &str,
        purpose: AuthTokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, AuthTokenStoreError> {
        let consumed = Entity::update_many()
            .col_expr(Column::ConsumedAt, Expr::value(now.fixed_offset()))
            .filter(Column::TokenHash.eq(token_hash))
            .filter(Column::Purpose.eq(purpose.as_str()))
            .filter(Column::ConsumedAt.is_null())
            .filter(Column::ExpiresAt.gt(now.fixed_offset()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| AuthTokenStoreError::DatabaseError(e.to_string()))?;

        Ok(consumed.into_iter().next().map(|m| m.user_id))
    }
}
