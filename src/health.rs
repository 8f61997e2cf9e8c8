use actix_web::{get, web, HttpResponse};
use deadpool_redis::{redis, Pool};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Check {
    Ok,
    Unhealthy,
}

impl Check {
    fn of<T, E>(result: Result<T, E>) -> Self {
        if result.is_ok() {
            Self::Ok
        } else {
            Self::Unhealthy
        }
    }
}

#[derive(Serialize)]
struct Readiness {
    status: Check,
    database: Check,
    redis: Check,
}

/// Liveness: no I/O.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": Check::Ok }))
}

/// Readiness: database `SELECT 1` and Redis `PING`.
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    redis: web::Data<Arc<Pool>>,
) -> HttpResponse {
    let database = database_status(&db).await;
    let redis = redis_status(&redis).await;

    if database == Check::Ok && redis == Check::Ok {
        return HttpResponse::Ok().json(Readiness {
            status: Check::Ok,
            database,
            redis,
        });
    }

    tracing::warn!(?database, ?redis, "Readiness check failed");
    HttpResponse::ServiceUnavailable().json(Readiness {
        status: Check::Unhealthy,
        database,
        redis,
    })
}

async fn database_status(db: &DatabaseConnection) -> Check {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1");
    Check::of(db.execute(ping).await)
}

async fn redis_status(pool: &Pool) -> Check {
    match pool.get().await {
        Ok(mut conn) => Check::of(redis::cmd("PING").query_async::<String>(&mut conn).await),
        Err(_) => Check::Unhealthy,
    }
}
