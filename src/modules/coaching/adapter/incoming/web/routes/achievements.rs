use actix_web::{get, web, Responder};

use super::coaching_errors::map_coaching_error;
use crate::auth::adapter::incoming::web::extractors::VerifiedUser;
use crate::coaching::application::ports::incoming::use_cases::{
    AchievementView, ClientAchievementView,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/achievements",
    responses((status = 200, description = "Active achievement catalog", body = [AchievementView])),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/achievements")]
pub async fn list_achievements_handler(user: VerifiedUser, data: web::Data<AppState>) -> impl Responder {
    match data.coaching.list_achievements.execute().await {
        Ok(catalog) => ApiResponse::success(catalog),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/client-achievements",
    responses((status = 200, description = "Achievements earned by the caller", body = [ClientAchievementView])),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/client-achievements")]
pub async fn list_client_achievements_handler(
    user: VerifiedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .coaching
        .list_client_achievements
        .execute(user.user_id.into())
        .await
    {
        Ok(earned) => ApiResponse::success(earned),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}
