use std::sync::Arc;

use actix_web::web;

use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::email_verification::{
    IConfirmEmailVerificationUseCase, IRequestEmailVerificationUseCase,
};
use crate::auth::application::use_cases::fetch_profile::FetchUserProfileUseCase;
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::logout_user::ILogoutUseCase;
use crate::auth::application::use_cases::password_reset::{
    IConfirmPasswordResetUseCase, IRequestPasswordResetUseCase,
};
use crate::auth::application::use_cases::refresh_token::IRefreshTokenUseCase;
use crate::auth::application::use_cases::update_profile::UpdateUserProfileUseCase;
use crate::coaching::application::coaching_use_cases::CoachingUseCases;
use crate::coaching::application::service::test_doubles::InMemoryCoaching;
use crate::media::application::media_use_cases::MediaUseCases;
use crate::media::application::ports::incoming::use_cases::{
    AdvanceUploadUseCase, CompleteDirectUploadUseCase, DeactivateMediaAssetUseCase, DeleteMediaAssetUseCase,
    GetUploadProgressUseCase, InitDirectUploadUseCase, ListMediaAssetsUseCase,
    UploadMediaAssetUseCase,
};
use crate::program::application::program_use_cases::ProgramUseCases;
use crate::program::application::service::test_doubles::InMemoryPrograms;
use crate::tests::support::in_memory_users::InMemoryUsers;
use crate::tests::support::stubs::*;
use crate::AppState;

/// Every slot starts as a stub that panics when called, or as an empty
/// in-memory bundle for programs and coaching. Tests swap in what they hit.
pub struct TestAppStateBuilder {
    register_user: Arc<UserRegistrationOrchestrator>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    refresh_token: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    logout_user: Arc<dyn ILogoutUseCase + Send + Sync>,
    request_email_verification: Arc<dyn IRequestEmailVerificationUseCase + Send + Sync>,
    confirm_email_verification: Arc<dyn IConfirmEmailVerificationUseCase + Send + Sync>,
    request_password_reset: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    confirm_password_reset: Arc<dyn IConfirmPasswordResetUseCase + Send + Sync>,
    fetch_user_profile: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    update_user_profile: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    media: MediaUseCases,
    program: ProgramUseCases,
    coaching: CoachingUseCases,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let programs = InMemoryPrograms::default();
        Self {
            register_user: registration_orchestrator(StubCreateUserUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            refresh_token: Arc::new(StubRefreshTokenUseCase),
            logout_user: Arc::new(StubLogoutUseCase),
            request_email_verification: Arc::new(StubRequestEmailVerificationUseCase),
            confirm_email_verification: Arc::new(StubConfirmEmailVerificationUseCase),
            request_password_reset: Arc::new(StubRequestPasswordResetUseCase),
            confirm_password_reset: Arc::new(StubConfirmPasswordResetUseCase),
            fetch_user_profile: Arc::new(StubFetchUserProfileUseCase),
            update_user_profile: Arc::new(StubUpdateUserProfileUseCase),
            media: MediaUseCases {
                upload: Arc::new(StubUploadMediaUseCase),
                init_direct_upload: Arc::new(StubInitDirectUploadUseCase),
                complete_direct_upload: Arc::new(StubCompleteDirectUploadUseCase),
                advance_upload: Arc::new(StubAdvanceUploadUseCase),
                get_upload_progress: Arc::new(StubGetUploadProgressUseCase),
                list: Arc::new(StubManageMediaUseCase),
                deactivate: Arc::new(StubManageMediaUseCase),
                delete: Arc::new(StubManageMediaUseCase),
            },
            program: ProgramUseCases::from_repository(programs.clone()),
            coaching: CoachingUseCases::from_repository(
                InMemoryCoaching::default(),
                Arc::new(InMemoryUsers::default()),
                Arc::new(programs),
            ),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user_orchestrator(
        mut self,
        orchestrator: Arc<UserRegistrationOrchestrator>,
    ) -> Self {
        self.register_user = orchestrator;
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_logout_user(mut self, uc: impl ILogoutUseCase + 'static) -> Self {
        self.logout_user = Arc::new(uc);
        self
    }

    pub fn with_request_email_verification(
        mut self,
        uc: impl IRequestEmailVerificationUseCase + 'static,
    ) -> Self {
        self.request_email_verification = Arc::new(uc);
        self
    }

    pub fn with_confirm_email_verification(
        mut self,
        uc: impl IConfirmEmailVerificationUseCase + 'static,
    ) -> Self {
        self.confirm_email_verification = Arc::new(uc);
        self
    }

    pub fn with_request_password_reset(
        mut self,
        uc: impl IRequestPasswordResetUseCase + 'static,
    ) -> Self {
        self.request_password_reset = Arc::new(uc);
        self
    }

    pub fn with_confirm_password_reset(
        mut self,
        uc: impl IConfirmPasswordResetUseCase + 'static,
    ) -> Self {
        self.confirm_password_reset = Arc::new(uc);
        self
    }

    pub fn with_fetch_user_profile(mut self, uc: impl FetchUserProfileUseCase + 'static) -> Self {
        self.fetch_user_profile = Arc::new(uc);
        self
    }

    pub fn with_update_user_profile(
        mut self,
        uc: impl UpdateUserProfileUseCase + 'static,
    ) -> Self {
        self.update_user_profile = Arc::new(uc);
        self
    }

    pub fn with_upload_media(mut self, uc: impl UploadMediaAssetUseCase + 'static) -> Self {
        self.media.upload = Arc::new(uc);
        self
    }

    pub fn with_init_direct_upload(mut self, uc: impl InitDirectUploadUseCase + 'static) -> Self {
        self.media.init_direct_upload = Arc::new(uc);
        self
    }

    pub fn with_complete_direct_upload(
        mut self,
        uc: impl CompleteDirectUploadUseCase + 'static,
    ) -> Self {
        self.media.complete_direct_upload = Arc::new(uc);
        self
    }

    pub fn with_advance_upload(mut self, uc: impl AdvanceUploadUseCase + 'static) -> Self {
        self.media.advance_upload = Arc::new(uc);
        self
    }

    pub fn with_get_upload_progress(
        mut self,
        uc: impl GetUploadProgressUseCase + 'static,
    ) -> Self {
        self.media.get_upload_progress = Arc::new(uc);
        self
    }

    pub fn with_list_media(mut self, uc: impl ListMediaAssetsUseCase + 'static) -> Self {
        self.media.list = Arc::new(uc);
        self
    }

    pub fn with_deactivate_media(
        mut self,
        uc: impl DeactivateMediaAssetUseCase + 'static,
    ) -> Self {
        self.media.deactivate = Arc::new(uc);
        self
    }

    pub fn with_delete_media(mut self, uc: impl DeleteMediaAssetUseCase + 'static) -> Self {
        self.media.delete = Arc::new(uc);
        self
    }

    pub fn with_program(mut self, program: ProgramUseCases) -> Self {
        self.program = program;
        self
    }

    pub fn with_coaching(mut self, coaching: CoachingUseCases) -> Self {
        self.coaching = coaching;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_orchestrator: self.register_user,
            login_user_use_case: self.login_user,
            refresh_token_use_case: self.refresh_token,
            logout_user_use_case: self.logout_user,
            request_email_verification_use_case: self.request_email_verification,
            confirm_email_verification_use_case: self.confirm_email_verification,
            request_password_reset_use_case: self.request_password_reset,
            confirm_password_reset_use_case: self.confirm_password_reset,
            fetch_user_profile_use_case: self.fetch_user_profile,
            update_user_profile_use_case: self.update_user_profile,
            media: self.media,
            program: self.program,
            coaching: self.coaching,
        })
    }
}
