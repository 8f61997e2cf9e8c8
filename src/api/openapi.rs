use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::api::schemas::{ErrorDetail, ErrorResponse};
use crate::auth::adapter::incoming::web::routes as auth_routes;
use crate::coaching::adapter::incoming::web::routes as coaching_routes;
use crate::coaching::application::domain::{AchievementCriteria, AchievementType};
use crate::media::adapter::incoming::web::routes as media_routes;
use crate::media::application::domain::policies::AssetCategory;
use crate::media::application::domain::UploadStatus;
use crate::program::adapter::incoming::web::routes as program_routes;

/// Request and response bodies named in the paths below are collected
/// automatically; only shared envelopes and enums are listed here.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wellness API",
        version = "1.0.0",
        description = "Accounts, media uploads, wellness programs and client coaching",
    ),
    paths(
        // Auth
        auth_routes::register_user_handler,
        auth_routes::login_user_handler,
        auth_routes::refresh_token_handler,
        auth_routes::logout_user_handler,
        auth_routes::request_email_verification_handler,
        auth_routes::confirm_email_verification_handler,
        auth_routes::request_password_reset_handler,
        auth_routes::confirm_password_reset_handler,
        auth_routes::get_profile_handler,
        auth_routes::update_profile_handler,
        // Media
        media_routes::upload_media_handler,
        media_routes::init_direct_upload_handler,
        media_routes::complete_direct_upload_handler,
        media_routes::get_upload_progress_handler,
        media_routes::advance_upload_handler,
        media_routes::list_media_handler,
        media_routes::deactivate_media_handler,
        media_routes::delete_media_handler,
        // Programs
        program_routes::create_routine_handler,
        program_routes::list_routines_handler,
        program_routes::get_routine_handler,
        program_routes::update_routine_handler,
        program_routes::add_routine_exercise_handler,
        program_routes::remove_routine_exercise_handler,
        program_routes::deactivate_routine_handler,
        program_routes::create_breathing_exercise_handler,
        program_routes::list_breathing_exercises_handler,
        program_routes::create_meditation_session_handler,
        program_routes::list_meditation_sessions_handler,
        program_routes::create_combined_routine_handler,
        program_routes::list_combined_routines_handler,
        // Coaching
        coaching_routes::assign_client_handler,
        coaching_routes::list_clients_handler,
        coaching_routes::update_assigned_routines_handler,
        coaching_routes::list_my_routines_handler,
        coaching_routes::get_my_routine_handler,
        coaching_routes::record_progress_handler,
        coaching_routes::list_progress_handler,
        coaching_routes::list_achievements_handler,
        coaching_routes::list_client_achievements_handler,
    ),
    components(schemas(
        ErrorResponse,
        ErrorDetail,
        AssetCategory,
        UploadStatus,
        AchievementType,
        AchievementCriteria,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and account tokens"),
        (name = "users", description = "Own profile"),
        (name = "media", description = "Media asset catalog"),
        (name = "uploads", description = "Upload progress tracking"),
        (name = "programs", description = "Routines, breathing exercises and meditation sessions"),
        (name = "coaching", description = "Client assignment, progress and achievements"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
