use std::sync::Arc;

use uuid::Uuid;

use crate::auth::application::domain::entities::{AuthTokenPurpose, UserRole};
use crate::auth::application::services::{spawn_email_with_retry, AuthTokenService};
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase,
};
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};

// Registration Output with Message
#[derive(Debug, Clone)]
pub struct UserRegistrationOutput {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub message: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            email: output.email,
            username: output.username,
            full_name: output.full_name,
            role: output.role,
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
        }
    }
}

// Registration Errors
#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),
}

// User Registration Service (Orchestration Layer)
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    tokens: AuthTokenService,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        tokens: AuthTokenService,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            tokens,
            email_service,
        }
    }

    /// Creates the account, then issues a verification token and mails it
    /// in the background. Token or email trouble never fails the signup;
    /// the user can ask for a new link.
    pub async fn register_user(
        &self,
        input: CreateUserInput,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created_user = self.create_user_use_case.execute(input).await?;

        match self
            .tokens
            .issue(created_user.user_id, AuthTokenPurpose::EmailVerification)
            .await
        {
            Ok(token) => {
                let email_service = self.email_service.clone();
                let recipient = EmailRecipient {
                    email: created_user.email.clone(),
                    full_name: created_user.full_name.clone(),
                };
                spawn_email_with_retry(created_user.user_id, "email_verification", move || {
                    let email_service = email_service.clone();
                    let recipient = recipient.clone();
                    let token = token.clone();
                    async move {
                        email_service
                            .send_verification_email(&recipient, &token)
                            .await
                    }
                });
            }
            Err(e) => {
                tracing::error!(
                    user_id = %created_user.user_id,
                    "Could not issue verification token: {}",
                    e
                );
            }
        }

        Ok(created_user.into())
    }
}
