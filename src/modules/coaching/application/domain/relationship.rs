use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;

/// One instructor coaching one client. A pair appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: Uuid,
    pub client_id: UserId,
    pub instructor_id: UserId,
    pub routine_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub fn new(
        instructor_id: UserId,
        client_id: UserId,
        routine_ids: Vec<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            instructor_id,
            routine_ids,
            created_at: now,
        }
    }
}

/// A relationship joined with the client's public profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedClient {
    pub relationship: Relationship,
    pub username: String,
    pub email: String,
    pub full_name: String,
}
