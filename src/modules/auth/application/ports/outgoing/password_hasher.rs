use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("Could not hash password")]
    Hashing,

    /// The stored hash is not a PHC string this hasher can read.
    #[error("Stored password hash is unreadable")]
    UnreadableHash,

    #[error("Hashing worker stopped unexpectedly")]
    Worker,
}

/// Hashes run off the async executor; a wrong password is `Ok(false)`,
/// never an error.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, HashError>;
}
