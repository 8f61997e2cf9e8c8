use actix_web::{get, web, Responder};
use uuid::Uuid;

use super::coaching_errors::map_coaching_error;
use crate::auth::adapter::incoming::web::extractors::ClientUser;
use crate::program::application::ports::incoming::use_cases::RoutineView;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Active routines assigned to the caller by any instructor.
#[utoipa::path(
    get,
    path = "/api/my-routines",
    responses((status = 200, description = "Assigned routines, newest first", body = [RoutineView])),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/my-routines")]
pub async fn list_my_routines_handler(user: ClientUser, data: web::Data<AppState>) -> impl Responder {
    match data.coaching.list_assigned_routines.execute(user.user_id.into()).await {
        Ok(routines) => ApiResponse::success(routines),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[utoipa::path(
    get,
    path = "/api/my-routines/{id}",
    params(("id" = Uuid, Path, description = "Routine id")),
    responses(
        (status = 200, description = "Assigned routine", body = RoutineView),
        (status = 404, description = "Routine not assigned to the caller or inactive")
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[get("/api/my-routines/{id}")]
pub async fn get_my_routine_handler(
    user: ClientUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .coaching
        .get_assigned_routine
        .execute(user.user_id.into(), path.into_inner())
        .await
    {
        Ok(routine) => ApiResponse::success(routine),
        Err(e) => map_coaching_error(user.user_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use serde_json::Value;
    use std::sync::Arc;

    use crate::auth::application::domain::entities::{UserId, UserRole};
    use crate::coaching::application::coaching_use_cases::CoachingUseCases;
    use crate::coaching::application::domain::Relationship;
    use crate::coaching::application::service::test_doubles::InMemoryCoaching;
    use crate::program::application::ports::incoming::use_cases::{
        CreateRoutineRequest, CreateRoutineUseCase,
    };
    use crate::program::application::service::test_doubles::InMemoryPrograms;
    use crate::program::application::service::RoutineService;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider};
    use crate::tests::support::in_memory_users::InMemoryUsers;

    struct Setup {
        programs: InMemoryPrograms,
        coaching: InMemoryCoaching,
        instructor: UserId,
        client: Uuid,
    }

    impl Setup {
        fn new() -> Self {
            Self {
                programs: InMemoryPrograms::default(),
                coaching: InMemoryCoaching::default(),
                instructor: UserId::from(Uuid::new_v4()),
                client: Uuid::new_v4(),
            }
        }

        async fn routine(&self, name: &str) -> Uuid {
            CreateRoutineUseCase::execute(
                &RoutineService::new(self.programs.clone()),
                self.instructor,
                CreateRoutineRequest {
                    name: name.into(),
                    description: String::new(),
                    exercises: vec![],
                },
            )
            .await
            .unwrap()
            .id
        }

        fn assign(&self, routine_ids: Vec<Uuid>) {
            self.coaching.relationships.lock().unwrap().push(Relationship::new(
                self.instructor,
                UserId::from(self.client),
                routine_ids,
                Utc::now(),
            ));
        }

        async fn get(&self, uri: &str, role: UserRole) -> (StatusCode, Value) {
            let coaching = CoachingUseCases::from_repository(
                self.coaching.clone(),
                Arc::new(InMemoryUsers::default()),
                Arc::new(self.programs.clone()),
            );
            let app_state = TestAppStateBuilder::default().with_coaching(coaching).build();
            let app = test::init_service(
                App::new()
                    .app_data(app_state)
                    .app_data(web::Data::new(test_token_provider()))
                    .app_data(custom_json_config())
                    .service(list_my_routines_handler)
                    .service(get_my_routine_handler),
            )
            .await;

            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer(self.client, true, role))
                .to_request();
            let resp = test::call_service(&app, req).await;
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }

    #[actix_web::test]
    async fn test_list_and_get_my_routines() {
        let setup = Setup::new();
        let stretch = setup.routine("Stretch").await;
        setup.routine("Unassigned").await;
        setup.assign(vec![stretch]);

        let (status, body) = setup.get("/api/my-routines", UserRole::Client).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body["data"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["name"], "Stretch");

        let (status, body) = setup
            .get(&format!("/api/my-routines/{}", stretch), UserRole::Client)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], stretch.to_string());
    }

    #[actix_web::test]
    async fn test_get_unassigned_routine_not_found() {
        let setup = Setup::new();
        let other = setup.routine("Not yours").await;
        setup.assign(vec![]);

        let (status, body) = setup
            .get(&format!("/api/my-routines/{}", other), UserRole::Client)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "ROUTINE_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_instructor_cannot_list_my_routines() {
        let (status, _) = Setup::new().get("/api/my-routines", UserRole::Instructor).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
