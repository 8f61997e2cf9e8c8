use async_trait::async_trait;

use super::email_sender::EmailError;

/// Who an account email goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecipient {
    pub email: String,
    pub full_name: String,
}

#[async_trait]
pub trait UserEmailNotifier: Send + Sync {
    /// `token` is the raw single-use token to embed in the link.
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError>;

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError>;
}
