use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Preferences, User, UserId, UserRole};
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};
use crate::auth::application::services::auth_tokens::test_support::InMemoryAuthTokenStore;
use crate::auth::application::services::AuthTokenService;
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase,
};
use crate::auth::application::use_cases::email_verification::{
    EmailVerificationError, IConfirmEmailVerificationUseCase, IRequestEmailVerificationUseCase,
};
use crate::auth::application::use_cases::fetch_profile::{
    FetchUserError, FetchUserProfileUseCase, UserProfile,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::logout_user::{
    ILogoutUseCase, LogoutRequest, LogoutResponse,
};
use crate::auth::application::use_cases::password_reset::{
    IConfirmPasswordResetUseCase, IRequestPasswordResetUseCase, PasswordResetError,
};
use crate::auth::application::use_cases::refresh_token::{
    IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
};
use crate::auth::application::use_cases::update_profile::{
    UpdateUserError, UpdateUserInput, UpdateUserProfileUseCase,
};
use crate::email::application::ports::outgoing::email_sender::EmailError;
use crate::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};
use crate::media::application::domain::UploadSummary;
use crate::media::application::ports::incoming::use_cases::{
    AdvanceUploadCommand, AdvanceUploadError, AdvanceUploadUseCase, CompleteDirectUploadCommand,
    CompleteDirectUploadError, CompleteDirectUploadUseCase, DeactivateMediaAssetUseCase,
    DeleteMediaAssetUseCase, DirectUploadTicket, GetUploadProgressError,
    GetUploadProgressUseCase, InitDirectUploadCommand, InitDirectUploadError,
    InitDirectUploadUseCase, ListMediaAssetsUseCase, ManageMediaError, MediaAssetView,
    UploadMediaAssetUseCase, UploadMediaCommand, UploadMediaError, UploadedMedia,
};


pub fn sample_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: "steady_breather".to_string(),
        email: "breather@example.com".to_string(),
        password_hash: "stored passphrase".to_string(),
        full_name: "Steady Breather".to_string(),
        phone: None,
        role: UserRole::Client,
        preferences: Preferences::from_stored(&Value::Null),
        created_at: now,
        updated_at: now,
        is_verified: true,
        is_deleted: false,
    }
}

/// Lets detached email tasks run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Hashes are the password itself.
#[derive(Clone, Default)]
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(password.to_string())
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(password == hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub kind: &'static str,
    pub email: String,
    pub token: String,
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, kind: &'static str, recipient: &EmailRecipient, token: &str) {
        self.sent.lock().unwrap().push(SentEmail {
            kind,
            email: recipient.email.clone(),
            token: token.to_string(),
        });
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError> {
        self.record("verification", recipient, token);
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), EmailError> {
        self.record("password_reset", recipient, token);
        Ok(())
    }
}

pub fn registration_orchestrator(
    create_user: impl ICreateUserUseCase + 'static,
) -> Arc<UserRegistrationOrchestrator> {
    Arc::new(UserRegistrationOrchestrator::new(
        Arc::new(create_user),
        AuthTokenService::new(
            Arc::new(InMemoryAuthTokenStore::default()),
            ChronoDuration::hours(24),
        ),
        Arc::new(RecordingNotifier::default()),
    ))
}


#[derive(Default, Clone)]
pub struct StubCreateUserUseCase;

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRefreshTokenUseCase;

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLogoutUseCase;

#[async_trait]
impl ILogoutUseCase for StubLogoutUseCase {
    async fn execute(&self, _request: LogoutRequest) -> LogoutResponse {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRequestEmailVerificationUseCase;

#[async_trait]
impl IRequestEmailVerificationUseCase for StubRequestEmailVerificationUseCase {
    async fn execute(&self, _email: &str) -> Result<(), EmailVerificationError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubConfirmEmailVerificationUseCase;

#[async_trait]
impl IConfirmEmailVerificationUseCase for StubConfirmEmailVerificationUseCase {
    async fn execute(&self, _token: &str) -> Result<Uuid, EmailVerificationError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRequestPasswordResetUseCase;

#[async_trait]
impl IRequestPasswordResetUseCase for StubRequestPasswordResetUseCase {
    async fn execute(&self, _email: &str) -> Result<(), PasswordResetError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubConfirmPasswordResetUseCase;

#[async_trait]
impl IConfirmPasswordResetUseCase for StubConfirmPasswordResetUseCase {
    async fn execute(&self, _token: &str, _new_password: &str) -> Result<(), PasswordResetError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubFetchUserProfileUseCase;

#[async_trait]
impl FetchUserProfileUseCase for StubFetchUserProfileUseCase {
    async fn execute(&self, _user_id: UserId) -> Result<UserProfile, FetchUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubUpdateUserProfileUseCase;

#[async_trait]
impl UpdateUserProfileUseCase for StubUpdateUserProfileUseCase {
    async fn execute(&self, _input: UpdateUserInput) -> Result<UserProfile, UpdateUserError> {
        unimplemented!("Not used in this test")
    }
}


#[derive(Default, Clone)]
pub struct StubUploadMediaUseCase;

#[async_trait]
impl UploadMediaAssetUseCase for StubUploadMediaUseCase {
    async fn execute(&self, _command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubInitDirectUploadUseCase;

#[async_trait]
impl InitDirectUploadUseCase for StubInitDirectUploadUseCase {
    async fn execute(
        &self,
        _command: InitDirectUploadCommand,
    ) -> Result<DirectUploadTicket, InitDirectUploadError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubCompleteDirectUploadUseCase;

#[async_trait]
impl CompleteDirectUploadUseCase for StubCompleteDirectUploadUseCase {
    async fn execute(
        &self,
        _command: CompleteDirectUploadCommand,
    ) -> Result<UploadedMedia, CompleteDirectUploadError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubAdvanceUploadUseCase;

#[async_trait]
impl AdvanceUploadUseCase for StubAdvanceUploadUseCase {
    async fn execute(
        &self,
        _command: AdvanceUploadCommand,
    ) -> Result<UploadSummary, AdvanceUploadError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGetUploadProgressUseCase;

#[async_trait]
impl GetUploadProgressUseCase for StubGetUploadProgressUseCase {
    async fn execute(
        &self,
        _owner: UserId,
        _upload_id: Uuid,
    ) -> Result<UploadSummary, GetUploadProgressError> {
        unimplemented!("Not used in this test")
    }
}

/// Serves list, deactivate and delete for routes that never reach them.
#[derive(Default, Clone)]
pub struct StubManageMediaUseCase;

#[async_trait]
impl ListMediaAssetsUseCase for StubManageMediaUseCase {
    async fn execute(&self, _owner: UserId) -> Result<Vec<MediaAssetView>, ManageMediaError> {
        unimplemented!("Not used in this test")
    }
}

#[async_trait]
impl DeactivateMediaAssetUseCase for StubManageMediaUseCase {
    async fn execute(
        &self,
        _owner: UserId,
        _asset_id: Uuid,
    ) -> Result<MediaAssetView, ManageMediaError> {
        unimplemented!("Not used in this test")
    }
}

#[async_trait]
impl DeleteMediaAssetUseCase for StubManageMediaUseCase {
    async fn execute(&self, _owner: UserId, _asset_id: Uuid) -> Result<(), ManageMediaError> {
        unimplemented!("Not used in this test")
    }
}
