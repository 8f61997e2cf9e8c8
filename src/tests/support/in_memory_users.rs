use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Preferences, User};
use crate::auth::application::ports::outgoing::{
    CreateUserData, ProfileChanges, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};

/// Users table double backing both the read and write ports.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    fn modify<T>(
        &self,
        user_id: Uuid,
        f: impl FnOnce(&mut User) -> T,
    ) -> Result<T, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id && !u.is_deleted)
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.updated_at = Utc::now();
        Ok(f(user))
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == data.email || u.username == data.username)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            full_name: data.full_name,
            phone: data.phone,
            role: data.role,
            preferences: Preferences::from_stored(&serde_json::Value::Null),
            created_at: now,
            updated_at: now,
            is_verified: false,
            is_deleted: false,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| u.password_hash = new_password_hash)
    }

    async fn activate_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| u.is_verified = true)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        self.modify(user_id, |u| {
            if let Some(full_name) = changes.full_name {
                u.full_name = full_name;
            }
            if let Some(phone) = changes.phone {
                u.phone = Some(phone);
            }
            if let Some(preferences) = changes.preferences {
                u.preferences = Preferences::from_stored(&preferences);
            }
            if let Some(hash) = changes.password_hash {
                u.password_hash = hash;
            }
            u.clone()
        })
    }
}
