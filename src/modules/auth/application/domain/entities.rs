use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Instructor,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
            UserRole::Client => "client",
        }
    }

    /// Instructors author programs and media; admins may act as instructors.
    pub fn can_instruct(&self) -> bool {
        matches!(self, UserRole::Instructor | UserRole::Admin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Client
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "instructor" => Ok(UserRole::Instructor),
            "client" => Ok(UserRole::Client),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User preferences stored as a JSON object. Reads always see the defaults
/// merged under whatever was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences(Map<String, Value>);

impl Default for Preferences {
    fn default() -> Self {
        Self::from_stored(&Value::Null)
    }
}

impl Preferences {
    pub fn defaults() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("notifications".into(), json!(true));
        map.insert("email_updates".into(), json!(true));
        map.insert("dark_mode".into(), json!(false));
        map.insert("language".into(), json!("en"));
        map
    }

    pub fn from_stored(stored: &Value) -> Self {
        let mut map = Self::defaults();
        if let Value::Object(obj) = stored {
            for (k, v) in obj {
                map.insert(k.clone(), v.clone());
            }
        }
        Self(map)
    }

    /// New keys win over the current effective values.
    pub fn merge(&mut self, update: &Map<String, Value>) {
        for (k, v) in update {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_verified: bool,
    pub is_deleted: bool,
}

/// What a single-use emailed token may be redeemed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthTokenPurpose {
    EmailVerification,
    PasswordReset,
}

impl AuthTokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthTokenPurpose::EmailVerification => "email_verification",
            AuthTokenPurpose::PasswordReset => "password_reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_defaults_merge_under_stored() {
        let prefs = Preferences::from_stored(&json!({"dark_mode": true, "timezone": "UTC"}));

        assert_eq!(prefs.as_map()["dark_mode"], true);
        assert_eq!(prefs.as_map()["notifications"], true);
        assert_eq!(prefs.as_map()["language"], "en");
        assert_eq!(prefs.as_map()["timezone"], "UTC");
    }

    #[test]
    fn test_preferences_from_non_object_uses_defaults() {
        let prefs = Preferences::from_stored(&Value::Null);
        assert_eq!(prefs.as_map(), &Preferences::defaults());
    }

    #[test]
    fn test_preferences_default_is_the_documented_set() {
        assert_eq!(Preferences::default().as_map(), &Preferences::defaults());
    }

    #[test]
    fn test_preferences_merge_overrides() {
        let mut prefs = Preferences::from_stored(&Value::Null);
        let mut update = Map::new();
        update.insert("language".into(), json!("id"));
        prefs.merge(&update);

        assert_eq!(prefs.as_map()["language"], "id");
        assert_eq!(prefs.as_map()["email_updates"], true);
    }

    #[test]
    fn test_role_parse_and_permissions() {
        assert_eq!("Instructor".parse::<UserRole>().unwrap(), UserRole::Instructor);
        assert!("coach".parse::<UserRole>().is_err());
        assert!(UserRole::Admin.can_instruct());
        assert!(!UserRole::Client.can_instruct());
        assert_eq!(UserRole::default(), UserRole::Client);
    }
}
