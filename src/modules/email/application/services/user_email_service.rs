use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::email::application::ports::outgoing::{
    EmailError, EmailRecipient, EmailSender, UserEmailNotifier,
};

/// Renders account emails and hands them to an [`EmailSender`].
#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    frontend_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, frontend_url: impl Into<String>) -> Self {
        Self {
            sender,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!("{}/{}?token={}", self.frontend_url, path, token)
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError> {
        let link = self.link("verify-email", token);
        let body = format!(
            "<p>Hi {},</p>\
             <p>Welcome aboard. Please confirm your email address:</p>\
             <p><a href=\"{link}\">{link}</a></p>\
             <p>The link expires in 24 hours.</p>",
            recipient.full_name,
            link = link
        );

        self.sender
            .send_email(&recipient.email, "Verify your email address", &body)
            .await
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError> {
        let link = self.link("reset-password", token);
        let body = format!(
            "<p>Hi {},</p>\
             <p>We received a request to reset your password:</p>\
             <p><a href=\"{link}\">{link}</a></p>\
             <p>If you did not ask for this you can ignore this email.</p>",
            recipient.full_name,
            link = link
        );

        self.sender
            .send_email(&recipient.email, "Reset your password", &body)
            .await
    }
}
