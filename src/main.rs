pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::coaching;
pub use modules::email;
pub use modules::media;
pub use modules::program;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::{
    Argon2Hasher, AuthTokenStorePostgres, RedisTokenRepository, UserQueryPostgres,
    UserRepositoryPostgres,
};
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};
use crate::auth::application::services::password::BasicPasswordPolicy;
use crate::auth::application::services::{AuthTokenConfig, AuthTokenService};
use crate::auth::application::use_cases::{
    create_user::CreateUserUseCase,
    email_verification::{
        ConfirmEmailVerificationUseCase, IConfirmEmailVerificationUseCase,
        IRequestEmailVerificationUseCase, RequestEmailVerificationUseCase,
    },
    fetch_profile::{FetchUserProfileService, FetchUserProfileUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    password_reset::{
        ConfirmPasswordResetUseCase, IConfirmPasswordResetUseCase, IRequestPasswordResetUseCase,
        RequestPasswordResetUseCase,
    },
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    update_profile::{UpdateUserProfileService, UpdateUserProfileUseCase},
};
use crate::coaching::adapter::outgoing::db::CoachingRepositoryPostgres;
use crate::coaching::application::coaching_use_cases::CoachingUseCases;
use crate::email::adapter::outgoing::{SmtpConfig, SmtpEmailSender};
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::email::application::services::UserEmailService;
use crate::media::adapter::outgoing::cloud_storage::GcsObjectStore;
use crate::media::adapter::outgoing::db::{
    MediaAssetRepositoryPostgres, UploadProgressRepositoryPostgres,
};
use crate::media::application::domain::policies::{AssetTypePolicy, StoragePolicy};
use crate::media::application::media_use_cases::MediaUseCases;
use crate::media::application::service::{
    AdvanceUploadService, CompleteDirectUploadService, DeactivateMediaAssetService, DeleteMediaAssetService,
    GetUploadProgressService, InitDirectUploadService, ListMediaAssetsService,
    UploadMediaAssetService,
};
use crate::program::adapter::outgoing::db::ProgramRepositoryPostgres;
use crate::program::application::ports::outgoing::RoutineRepository;
use crate::program::application::program_use_cases::ProgramUseCases;
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub request_email_verification_use_case:
        Arc<dyn IRequestEmailVerificationUseCase + Send + Sync>,
    pub confirm_email_verification_use_case:
        Arc<dyn IConfirmEmailVerificationUseCase + Send + Sync>,
    pub request_password_reset_use_case: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    pub confirm_password_reset_use_case: Arc<dyn IConfirmPasswordResetUseCase + Send + Sync>,
    pub fetch_user_profile_use_case: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    pub update_user_profile_use_case: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    pub media: MediaUseCases,
    pub program: ProgramUseCases,
    pub coaching: CoachingUseCases,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // .env.{RUST_ENV} first, then plain .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    if dotenvy::from_filename(format!(".env.{rust_env}")).is_err() {
        dotenvy::dotenv().ok();
    }
    info!(environment = %rust_env, "Starting wellness backend");

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set");
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set");
    let server_url = format!("{host}:{port}");

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);
    let db = Arc::new(
        Database::connect(opt)
            .await
            .expect("Failed to connect to database"),
    );

    let redis = Arc::new(
        Config::from_url(&redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create Redis pool"),
    );

    // Auth
    let jwt_service = JwtTokenService::new(JwtConfig::from_env());
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let hasher: Arc<dyn PasswordHasher + Send + Sync> = Arc::new(Argon2Hasher::from_env());
    let password_policy: Arc<dyn PasswordPolicy + Send + Sync> = Arc::new(BasicPasswordPolicy);

    let user_query = UserQueryPostgres::new(Arc::clone(&db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db));
    let revoked_tokens = RedisTokenRepository::new(Arc::clone(&redis));

    let token_config = AuthTokenConfig::from_env();
    let auth_tokens = AuthTokenService::new(
        Arc::new(AuthTokenStorePostgres::new(Arc::clone(&db))),
        token_config.ttl,
    );

    let smtp_sender = SmtpEmailSender::from_config(&SmtpConfig::from_env())
        .expect("Invalid SMTP configuration");
    let notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(UserEmailService::new(
        Arc::new(smtp_sender),
        token_config.frontend_url,
    ));

    let create_user = CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        Arc::clone(&hasher),
        Arc::clone(&password_policy),
    );
    let register_user_orchestrator = UserRegistrationOrchestrator::new(
        Arc::new(create_user),
        auth_tokens.clone(),
        Arc::clone(&notifier),
    );

    // Media
    let storage_policy = StoragePolicy::from_env();
    let object_store = GcsObjectStore::new(storage_policy.store_timeout);
    let assets = MediaAssetRepositoryPostgres::new(Arc::clone(&db));
    let uploads = UploadProgressRepositoryPostgres::new(Arc::clone(&db));
    let media = MediaUseCases {
        upload: Arc::new(UploadMediaAssetService::new(
            object_store.clone(),
            assets.clone(),
            uploads.clone(),
            storage_policy.clone(),
        )),
        init_direct_upload: Arc::new(InitDirectUploadService::new(
            object_store.clone(),
            uploads.clone(),
            storage_policy,
        )),
        complete_direct_upload: Arc::new(CompleteDirectUploadService::new(
            object_store.clone(),
            assets.clone(),
            uploads.clone(),
        )),
        advance_upload: Arc::new(AdvanceUploadService::new(uploads.clone())),
        get_upload_progress: Arc::new(GetUploadProgressService::new(uploads)),
        list: Arc::new(ListMediaAssetsService::new(assets.clone())),
        deactivate: Arc::new(DeactivateMediaAssetService::new(assets.clone())),
        delete: Arc::new(DeleteMediaAssetService::new(object_store, assets)),
    };

    // Programs and coaching
    let programs = ProgramRepositoryPostgres::new(Arc::clone(&db));
    let routines: Arc<dyn RoutineRepository> = Arc::new(programs.clone());
    let users: Arc<dyn UserQuery> = Arc::new(user_query.clone());
    let program = ProgramUseCases::from_repository(programs);
    let coaching = CoachingUseCases::from_repository(
        CoachingRepositoryPostgres::new(Arc::clone(&db)),
        users,
        routines,
    );

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        login_user_use_case: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            Arc::clone(&hasher),
            Arc::clone(&token_provider),
        )),
        refresh_token_use_case: Arc::new(RefreshTokenUseCase::new(
            revoked_tokens.clone(),
            Arc::clone(&token_provider),
        )),
        logout_user_use_case: Arc::new(LogoutUseCase::new(
            revoked_tokens,
            Arc::clone(&token_provider),
        )),
        request_email_verification_use_case: Arc::new(RequestEmailVerificationUseCase::new(
            user_query.clone(),
            auth_tokens.clone(),
            Arc::clone(&notifier),
        )),
        confirm_email_verification_use_case: Arc::new(ConfirmEmailVerificationUseCase::new(
            user_repo.clone(),
            auth_tokens.clone(),
        )),
        request_password_reset_use_case: Arc::new(RequestPasswordResetUseCase::new(
            user_query.clone(),
            auth_tokens.clone(),
            notifier,
        )),
        confirm_password_reset_use_case: Arc::new(ConfirmPasswordResetUseCase::new(
            user_repo.clone(),
            auth_tokens,
            Arc::clone(&hasher),
            Arc::clone(&password_policy),
        )),
        fetch_user_profile_use_case: Arc::new(FetchUserProfileService::new(user_query.clone())),
        update_user_profile_use_case: Arc::new(UpdateUserProfileService::new(
            user_query,
            user_repo,
            hasher,
            password_policy,
        )),
        media,
        program,
        coaching,
    };

    let upload_limit = AssetTypePolicy::largest_max_size_bytes() as usize;
    info!(%server_url, upload_limit, "Listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(Arc::clone(&redis)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(web::PayloadConfig::new(upload_limit))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::coaching::adapter::incoming::web::routes as coaching_routes;
    use crate::media::adapter::incoming::web::routes as media_routes;
    use crate::program::adapter::incoming::web::routes as program_routes;

    // Health
    cfg.service(health::health);
    cfg.service(health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::refresh_token_handler);
    cfg.service(auth_routes::logout_user_handler);
    cfg.service(auth_routes::request_email_verification_handler);
    cfg.service(auth_routes::confirm_email_verification_handler);
    cfg.service(auth_routes::request_password_reset_handler);
    cfg.service(auth_routes::confirm_password_reset_handler);
    cfg.service(auth_routes::get_profile_handler);
    cfg.service(auth_routes::update_profile_handler);
    // Media
    cfg.service(media_routes::upload_media_handler);
    cfg.service(media_routes::init_direct_upload_handler);
    cfg.service(media_routes::complete_direct_upload_handler);
    cfg.service(media_routes::get_upload_progress_handler);
    cfg.service(media_routes::advance_upload_handler);
    cfg.service(media_routes::list_media_handler);
    cfg.service(media_routes::deactivate_media_handler);
    cfg.service(media_routes::delete_media_handler);
    // Programs
    cfg.service(program_routes::create_routine_handler);
    cfg.service(program_routes::list_routines_handler);
    cfg.service(program_routes::get_routine_handler);
    cfg.service(program_routes::update_routine_handler);
    cfg.service(program_routes::add_routine_exercise_handler);
    cfg.service(program_routes::remove_routine_exercise_handler);
    cfg.service(program_routes::deactivate_routine_handler);
    cfg.service(program_routes::create_breathing_exercise_handler);
    cfg.service(program_routes::list_breathing_exercises_handler);
    cfg.service(program_routes::create_meditation_session_handler);
    cfg.service(program_routes::list_meditation_sessions_handler);
    cfg.service(program_routes::create_combined_routine_handler);
    cfg.service(program_routes::list_combined_routines_handler);
    // Coaching
    cfg.service(coaching_routes::assign_client_handler);
    cfg.service(coaching_routes::list_clients_handler);
    cfg.service(coaching_routes::update_assigned_routines_handler);
    cfg.service(coaching_routes::list_my_routines_handler);
    cfg.service(coaching_routes::get_my_routine_handler);
    cfg.service(coaching_routes::record_progress_handler);
    cfg.service(coaching_routes::list_progress_handler);
    cfg.service(coaching_routes::list_achievements_handler);
    cfg.service(coaching_routes::list_client_achievements_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
